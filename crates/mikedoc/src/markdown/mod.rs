//! Markdown renderer
//!
//! Turns the documentation model into the pages of the API reference:
//!
//! - `README.md`: home page listing the modules
//! - `modules/<dotted/path>/README.md`: module overview
//! - `modules/<dotted/path>/fields.md`: fields table
//! - `modules/<dotted/path>/funcs.md`: functions documentation
//! - `modules/<dotted/path>/class-<Name>.md`: one page per class
//!
//! Pages are rendered in memory; writing them is the job of
//! [`ApiSite`](crate::site::ApiSite).

mod sections;
pub mod templates;

use crate::diagnostics::DocResult;
use crate::member::MemberDescriptor;
use crate::module::ModuleDescriptor;
use crate::utils::paths::build_api_url;
use crate::utils::text::{
    escape_emphasis, escape_unprintable, short_description, single_line, urlify_section_title,
};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

/// Length of module descriptions on the home page
pub const MODULE_DESC_LEN_ON_HOME_PAGE: usize = 256;

/// Length of member descriptions on module pages
pub const MEMBER_DESC_LEN_ON_MODULE_PAGE: usize = 128;

/// Intro of an exceptions table whose docstring has none
pub const DEFAULT_INTRO_FOR_EXCEPTIONS_SECTION: &str =
    "The table below outlines exceptions that may occur.";

/// Placeholder for a missing description
pub const NO_DOCSTRING: &str = "No docstring.";

/// Placeholder for a missing class description
pub const NO_CLASS_DOCSTRING: &str = "No class docstring.";

/// Placeholder for a record field without description
pub const NO_DESCRIPTION: &str = "No description.";

/// Placeholder for a class without declared bases
pub const NO_INHERITANCE: &str = "No inheritance.";

/// Placeholder for a field whose value was not recorded
pub const NO_VALUE: &str = "No value.";

/// Project settings shared by every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    /// Public name of the project
    pub project_name: String,
    /// Url of the project, often its README
    pub project_url: String,
    /// Package directory, relative to the project root
    pub pkg_dir: String,
    /// API reference directory, relative to the project root
    pub api_dir: String,
}

impl SiteContext {
    /// Create a site context
    pub fn new(
        project_name: impl Into<String>,
        project_url: impl Into<String>,
        pkg_dir: impl Into<String>,
        api_dir: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_url: project_url.into(),
            pkg_dir: pkg_dir.into(),
            api_dir: api_dir.into(),
        }
    }
}

/// One rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Module the page documents, `None` for the home page
    pub module: Option<String>,
    /// File name
    pub basename: String,
    /// Markdown text
    pub text: String,
}

impl RenderedPage {
    /// Path of the page relative to the API directory
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(module) = &self.module {
            path.push("modules");
            path.extend(module.split('.'));
        }
        path.push(&self.basename);
        path
    }

    /// Check if the page has no content
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Renders the documentation model to Markdown
pub struct MarkdownRenderer {
    registry: Handlebars<'static>,
    context: SiteContext,
}

impl MarkdownRenderer {
    /// Create a renderer for the given project
    pub fn new(context: SiteContext) -> DocResult<Self> {
        Ok(Self {
            registry: templates::registry()?,
            context,
        })
    }

    /// Get the site context
    pub fn context(&self) -> &SiteContext {
        &self.context
    }

    /// Render every page of the API reference.
    ///
    /// Modules exporting nothing get no page and are left out of the home
    /// page; without any documented module there is no home page either.
    pub fn render_site(&self, modules: &[ModuleDescriptor<'_>]) -> DocResult<Vec<RenderedPage>> {
        let mut pages = Vec::new();
        let mut documented = Vec::new();

        for module in modules {
            if module.is_empty() {
                continue;
            }
            documented.push(module);

            pages.push(self.module_page(module, "README.md", self.overview_page(module)?));
            if let Some(text) = self.fields_page(module)? {
                pages.push(self.module_page(module, "fields.md", text));
            }
            if let Some(text) = self.funcs_page(module)? {
                pages.push(self.module_page(module, "funcs.md", text));
            }
            for class in module.classes() {
                let basename = class_page_basename(&class.name);
                pages.push(self.module_page(module, &basename, self.class_page(module, class)?));
            }
        }

        if !documented.is_empty() {
            pages.push(RenderedPage {
                module: None,
                basename: "README.md".to_string(),
                text: self.home_page(&documented)?,
            });
        }

        Ok(pages)
    }

    fn module_page(&self, module: &ModuleDescriptor<'_>, basename: &str, text: String) -> RenderedPage {
        RenderedPage {
            module: Some(module.name.clone()),
            basename: basename.to_string(),
            text,
        }
    }

    /// Home page listing `modules`
    pub fn home_page(&self, modules: &[&ModuleDescriptor<'_>]) -> DocResult<String> {
        let mut contents = Vec::with_capacity(modules.len());
        for module in modules {
            let description = module.docstring.description_or(NO_DOCSTRING);
            contents.push(self.render(
                "module_line",
                &json!({
                    "module_name": escape_emphasis(&module.name),
                    "api_url": build_api_url(&self.context.api_dir, Some(module.name.as_str()), "README.md"),
                    "short_description": short_description(description, MODULE_DESC_LEN_ON_HOME_PAGE),
                }),
            )?);
        }

        self.render(
            "home_page",
            &json!({
                "project_name": escape_emphasis(&self.context.project_name),
                "project_url": self.context.project_url,
                "contents": contents.join("\n\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
    }

    /// Module overview page
    pub fn overview_page(&self, module: &ModuleDescriptor<'_>) -> DocResult<String> {
        let sections: Vec<String> = [
            self.fields_section(module)?,
            self.funcs_section(module)?,
            self.classes_section(module)?,
        ]
        .into_iter()
        .flatten()
        .collect();

        self.render(
            "overview_page",
            &json!({
                "header_div": self.header_div_1(&module.name)?,
                "module_name": escape_emphasis(&module.name),
                "description": module.docstring.description_or(NO_DOCSTRING),
                "members": sections.join("\n\n"),
            }),
        )
    }

    /// Fields page, `None` when the module has no field
    pub fn fields_page(&self, module: &ModuleDescriptor<'_>) -> DocResult<Option<String>> {
        let fields = module.fields();
        if fields.is_empty() {
            return Ok(None);
        }

        let mut entries = Vec::with_capacity(fields.len());
        for field in fields {
            entries.push(self.table_row(&escape_emphasis(&field.name), &value_span(field.value()))?);
        }

        self.render(
            "fields_page",
            &json!({
                "header_div": self.header_div_2(&module.name)?,
                "module_name": escape_emphasis(&module.name),
                "module_api_url": self.module_url(&module.name, "README.md"),
                "entries": entries.join("\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
        .map(Some)
    }

    /// Functions page, `None` when the module has no function
    pub fn funcs_page(&self, module: &ModuleDescriptor<'_>) -> DocResult<Option<String>> {
        let funcs = module.callables();
        if funcs.is_empty() {
            return Ok(None);
        }

        let mut contents = Vec::with_capacity(funcs.len());
        let mut index = Vec::with_capacity(funcs.len());
        for func in funcs {
            contents.push(self.func_doc(&func.name, &func.docstring, func.signature(), None)?);
            index.push(self.index_line(&func.name)?);
        }

        self.render(
            "funcs_doc_page",
            &json!({
                "header_div": self.header_div_2(&module.name)?,
                "module_name": escape_emphasis(&module.name),
                "module_api_url": self.module_url(&module.name, "README.md"),
                "index_of_funcs": index.join("\n"),
                "contents": contents.join("\n\n"),
            }),
        )
        .map(Some)
    }

    /// Page of one class
    pub fn class_page(
        &self,
        module: &ModuleDescriptor<'_>,
        member: &MemberDescriptor<'_>,
    ) -> DocResult<String> {
        let mut contents = Vec::new();
        if let Some(class) = member.class() {
            let fields = if class.is_record() {
                self.record_fields_table(class)?
            } else if class.is_enumeration() {
                self.enum_fields_table(class)?
            } else {
                self.class_fields_table(class)?
            };
            contents.extend(fields);
            contents.extend(self.properties_table(class)?);
            contents.extend(self.methods_section(class)?);
        }

        let inheritance = match member.class() {
            Some(class) => self.inheritance_segment(&class.bases)?,
            None => NO_INHERITANCE.to_string(),
        };

        self.render(
            "class_doc_page",
            &json!({
                "header_div": self.header_div_2(&module.name)?,
                "class_name": escape_emphasis(&member.name),
                "module_name": escape_emphasis(&module.name),
                "module_api_url": self.module_url(&module.name, "README.md"),
                "inheritance": inheritance,
                "description": member.docstring.description_or(NO_CLASS_DOCSTRING),
                "contents": contents.join("\n\n"),
            }),
        )
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> DocResult<String> {
        Ok(self.registry.render(name, data)?)
    }

    fn module_url(&self, module: &str, basename: &str) -> String {
        build_api_url(&self.context.api_dir, Some(module), basename)
    }

    fn back_to_top(&self) -> DocResult<String> {
        let title = format!("{} API Reference", self.context.project_name);
        self.render("back_to_top", &json!({ "href": urlify_section_title(&title) }))
    }

    fn table_row(&self, col1: &str, col2: &str) -> DocResult<String> {
        self.render("two_columns_table_entry", &json!({ "col1": col1, "col2": col2 }))
    }

    fn index_line(&self, name: &str) -> DocResult<String> {
        self.render(
            "index_line",
            &json!({ "name": escape_emphasis(name), "url": urlify_section_title(name) }),
        )
    }
}

/// File name of a class page
pub fn class_page_basename(class_name: &str) -> String {
    format!("class-{}.md", class_name)
}

/// Inline code span for a printable value
fn value_span(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("`{}`", escape_unprintable(value)),
        None => NO_VALUE.to_string(),
    }
}

/// Flattened text for a table cell
fn cell(text: &str) -> String {
    single_line(text)
}
