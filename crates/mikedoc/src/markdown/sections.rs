//! Page fragments shared by the module and class pages

use super::{
    cell, class_page_basename, value_span, MarkdownRenderer,
    DEFAULT_INTRO_FOR_EXCEPTIONS_SECTION, MEMBER_DESC_LEN_ON_MODULE_PAGE, NO_DESCRIPTION,
    NO_DOCSTRING, NO_INHERITANCE,
};
use crate::class::{ClassDescriptor, ClassMemberKind};
use crate::diagnostics::DocResult;
use crate::docstring::ParsedDocstring;
use crate::hyphen_list::HyphenatedList;
use crate::module::ModuleDescriptor;
use crate::reflection::BaseRef;
use crate::utils::paths::{build_api_url, build_src_url, package_name};
use crate::utils::text::{escape_emphasis, short_description, urlify_section_title};
use serde_json::json;

/// Shown in place of a signature the adapter could not provide
const UNKNOWN_SIGNATURE: &str = "(...)";

impl MarkdownRenderer {
    /// Navigation header of the overview page
    pub(super) fn header_div_1(&self, module_name: &str) -> DocResult<String> {
        self.render(
            "header_div_1",
            &json!({
                "project_name": escape_emphasis(&self.context.project_name),
                "project_url": self.context.project_url,
                "home_url": build_api_url(&self.context.api_dir, None, "README.md"),
                "src_url": build_src_url(&self.context.pkg_dir, module_name),
            }),
        )
    }

    /// Navigation header of the module sub-pages, linking the overview
    pub(super) fn header_div_2(&self, module_name: &str) -> DocResult<String> {
        self.render(
            "header_div_2",
            &json!({
                "project_name": escape_emphasis(&self.context.project_name),
                "project_url": self.context.project_url,
                "home_url": build_api_url(&self.context.api_dir, None, "README.md"),
                "api_url": self.module_url(module_name, "README.md"),
                "src_url": build_src_url(&self.context.pkg_dir, module_name),
            }),
        )
    }

    pub(super) fn fields_section(&self, module: &ModuleDescriptor<'_>) -> DocResult<Option<String>> {
        let fields = module.fields();
        if fields.is_empty() {
            return Ok(None);
        }

        let mut contents = Vec::with_capacity(fields.len());
        for field in fields {
            contents.push(self.field_line(&field.name, field.value())?);
        }

        self.render(
            "all_fields_section",
            &json!({
                "fields_page_url": self.module_url(&module.name, "fields.md"),
                "contents": contents.join("\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
        .map(Some)
    }

    pub(super) fn funcs_section(&self, module: &ModuleDescriptor<'_>) -> DocResult<Option<String>> {
        let funcs = module.callables();
        if funcs.is_empty() {
            return Ok(None);
        }

        let funcs_page_url = self.module_url(&module.name, "funcs.md");
        let mut contents = Vec::with_capacity(funcs.len());
        for func in funcs {
            let description = func.docstring.description_or(NO_DOCSTRING);
            contents.push(self.render(
                "func_line",
                &json!({
                    "name": escape_emphasis(&func.name),
                    "doc_url": format!("{}{}", funcs_page_url, urlify_section_title(&func.name)),
                    "short_description": short_description(description, MEMBER_DESC_LEN_ON_MODULE_PAGE),
                }),
            )?);
        }

        self.render(
            "all_functions_section",
            &json!({
                "funcs_page_url": funcs_page_url,
                "contents": contents.join("\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
        .map(Some)
    }

    pub(super) fn classes_section(&self, module: &ModuleDescriptor<'_>) -> DocResult<Option<String>> {
        let classes = module.classes();
        if classes.is_empty() {
            return Ok(None);
        }

        let mut contents = Vec::with_capacity(classes.len());
        for member in classes {
            let description = member.docstring.description_or(NO_DOCSTRING);
            let class_page_url = self.module_url(&module.name, &class_page_basename(&member.name));
            let sub_contents = match member.class() {
                Some(class) if class.is_enumeration() => self.enum_lines(class)?,
                Some(class) if class.is_record() => self.record_lines(class)?,
                Some(class) => self.class_member_lines(class, &class_page_url)?,
                None => String::new(),
            };

            contents.push(self.render(
                "class_section",
                &json!({
                    "name": escape_emphasis(&member.name),
                    "doc_url": class_page_url,
                    "short_description": short_description(description, MEMBER_DESC_LEN_ON_MODULE_PAGE),
                    "contents": sub_contents,
                }),
            )?);
        }

        self.render(
            "all_classes_section",
            &json!({
                "contents": contents.join("\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
        .map(Some)
    }

    /// One line per class member, constructor excluded
    fn class_member_lines(&self, class: &ClassDescriptor<'_>, class_page_url: &str) -> DocResult<String> {
        let mut lines = Vec::new();
        for member in class.members.iter().filter(|m| !m.is_constructor()) {
            let (anchor, kv_sign, description) = match member.kind {
                ClassMemberKind::Property(accessors) => (
                    urlify_section_title("Properties table"),
                    ";",
                    format!("_{}_", accessors.names().join(", ")),
                ),
                ClassMemberKind::Field => (
                    urlify_section_title("Fields table"),
                    " =",
                    value_span(member.symbol.value.as_deref()),
                ),
                ClassMemberKind::Method(_) => (
                    urlify_section_title(&member.name),
                    ":",
                    member.docstring.description_or(NO_DOCSTRING).to_string(),
                ),
            };

            lines.push(self.render(
                "class_member_line",
                &json!({
                    "name": escape_emphasis(&member.name),
                    "doc_url": format!("{}{}", class_page_url, anchor),
                    "kv_sign": kv_sign,
                    "short_description": short_description(&description, MEMBER_DESC_LEN_ON_MODULE_PAGE),
                }),
            )?);
        }
        Ok(lines.join("\n"))
    }

    fn enum_lines(&self, class: &ClassDescriptor<'_>) -> DocResult<String> {
        let mut lines = Vec::new();
        for constant in class.constants() {
            lines.push(self.field_line(&constant.name, Some(constant.value.as_str()))?);
        }
        Ok(lines.join("\n"))
    }

    fn record_lines(&self, class: &ClassDescriptor<'_>) -> DocResult<String> {
        let mut lines = Vec::new();
        for field in class.record_fields() {
            lines.push(self.render(
                "record_field_line",
                &json!({
                    "name": escape_emphasis(&field.name),
                    "description": field.doc.as_deref().unwrap_or(NO_DESCRIPTION),
                }),
            )?);
        }
        Ok(lines.join("\n"))
    }

    fn field_line(&self, name: &str, value: Option<&str>) -> DocResult<String> {
        self.render(
            "field_line",
            &json!({ "name": escape_emphasis(name), "value": value_span(value) }),
        )
    }

    /// Documentation section of one function or method
    pub(super) fn func_doc(
        &self,
        name: &str,
        docstring: &ParsedDocstring,
        signature: Option<&str>,
        decorator: Option<&str>,
    ) -> DocResult<String> {
        let mut contents = Vec::new();
        if let Some(params) = docstring.parameters() {
            contents.push(self.params_table(params)?);
        }
        if let Some(text) = docstring.returns() {
            contents.push(self.render("func_returns_line", &json!({ "text": text }))?);
        }
        if let Some(text) = docstring.yields() {
            contents.push(self.render("func_yields_line", &json!({ "text": text }))?);
        }
        if let Some(exceptions) = docstring.exceptions() {
            contents.push(self.exceptions_section(exceptions)?);
        }
        contents.push(self.back_to_top()?);

        self.render(
            "func_doc_section",
            &json!({
                "func_name_1": escape_emphasis(name),
                "func_name_2": name,
                "description": docstring.description_or(NO_DOCSTRING),
                "decorator": decorator.map(|d| format!("{}\n", d)).unwrap_or_default(),
                "signature": signature.unwrap_or(UNKNOWN_SIGNATURE),
                "contents": contents.join("\n\n"),
            }),
        )
    }

    /// Parameters table, preceded by the list intro when there is one
    fn params_table(&self, params: &HyphenatedList) -> DocResult<String> {
        let mut contents = Vec::new();
        if let Some(intro) = params.intro() {
            contents.push(intro.to_string());
        }

        let mut entries = Vec::new();
        for (key, value) in params.entries() {
            entries.push(self.table_row(&escape_emphasis(key), &cell(value))?);
        }
        contents.push(self.render("func_params_table", &json!({ "contents": entries.join("\n") }))?);

        Ok(contents.join("\n\n"))
    }

    /// Exceptions section, with a default intro when the list has none
    fn exceptions_section(&self, exceptions: &HyphenatedList) -> DocResult<String> {
        let intro = exceptions
            .intro()
            .unwrap_or(DEFAULT_INTRO_FOR_EXCEPTIONS_SECTION);

        let mut entries = Vec::new();
        for (key, value) in exceptions.entries() {
            entries.push(self.table_row(key, &cell(value))?);
        }
        let table = self.render(
            "func_exceptions_table",
            &json!({ "contents": entries.join("\n") }),
        )?;

        self.render(
            "func_exceptions_section",
            &json!({ "contents": format!("{}\n\n{}", intro, table) }),
        )
    }

    pub(super) fn class_fields_table(&self, class: &ClassDescriptor<'_>) -> DocResult<Option<String>> {
        let mut entries = Vec::new();
        for field in class.fields() {
            entries.push(self.table_row(
                &escape_emphasis(&field.name),
                &value_span(field.symbol.value.as_deref()),
            )?);
        }
        self.table_section("fields_exposed_in_class", entries)
    }

    pub(super) fn enum_fields_table(&self, class: &ClassDescriptor<'_>) -> DocResult<Option<String>> {
        let mut entries = Vec::new();
        for constant in class.constants() {
            entries.push(self.table_row(
                &escape_emphasis(&constant.name),
                &value_span(Some(constant.value.as_str())),
            )?);
        }
        self.table_section("fields_exposed_in_enum", entries)
    }

    pub(super) fn record_fields_table(&self, class: &ClassDescriptor<'_>) -> DocResult<Option<String>> {
        let mut entries = Vec::new();
        for field in class.record_fields() {
            let description = field.doc.as_deref().unwrap_or(NO_DESCRIPTION);
            entries.push(self.table_row(&escape_emphasis(&field.name), &cell(description))?);
        }
        self.table_section("fields_exposed_in_record", entries)
    }

    pub(super) fn properties_table(&self, class: &ClassDescriptor<'_>) -> DocResult<Option<String>> {
        let mut entries = Vec::new();
        for prop in class.properties() {
            let accessors = match prop.kind {
                ClassMemberKind::Property(accessors) => accessors.names().join(", "),
                _ => String::new(),
            };
            entries.push(self.render(
                "three_columns_table_entry",
                &json!({
                    "col1": escape_emphasis(&prop.name),
                    "col2": format!("_{}_", accessors),
                    "col3": cell(prop.docstring.description_or(NO_DOCSTRING)),
                }),
            )?);
        }
        self.table_section("properties_exposed_in_class", entries)
    }

    fn table_section(&self, template: &str, entries: Vec<String>) -> DocResult<Option<String>> {
        if entries.is_empty() {
            return Ok(None);
        }
        self.render(
            template,
            &json!({
                "contents": entries.join("\n"),
                "back_to_top": self.back_to_top()?,
            }),
        )
        .map(Some)
    }

    pub(super) fn methods_section(&self, class: &ClassDescriptor<'_>) -> DocResult<Option<String>> {
        let mut contents = Vec::new();
        let mut index = Vec::new();
        for method in class.methods() {
            contents.push(self.func_doc(
                &method.name,
                &method.docstring,
                method.signature,
                method.decorator(),
            )?);
            index.push(self.index_line(&method.name)?);
        }
        if contents.is_empty() {
            return Ok(None);
        }

        self.render(
            "methods_section",
            &json!({
                "index_of_methods": index.join("\n"),
                "contents": contents.join("\n\n"),
            }),
        )
        .map(Some)
    }

    /// Inheritance line: bases inside the project package become links to
    /// their class page, other bases are code spans
    pub(super) fn inheritance_segment(&self, bases: &[BaseRef<'_>]) -> DocResult<String> {
        if bases.is_empty() {
            return Ok(NO_INHERITANCE.to_string());
        }

        let project_package = package_name(&self.context.pkg_dir);
        let mut segments = Vec::with_capacity(bases.len());
        for base in bases {
            let dotted = base.display_name();
            let shown = escape_emphasis(&dotted.replace(".__init__.", "."));
            let top_level = dotted.split('.').next();

            match base.module() {
                Some(module) if top_level.is_some() && top_level == project_package => {
                    let url = build_api_url(
                        &self.context.api_dir,
                        Some(module.as_str()),
                        &class_page_basename(base.name()),
                    );
                    segments.push(format!("[{}]({})", shown, url));
                }
                _ => segments.push(format!("`{}`", shown)),
            }
        }

        Ok(segments.join(", "))
    }
}
