//! Page templates
//!
//! Handlebars templates for every page and page fragment. Fragments are
//! assembled in Rust and substituted as plain values, so no template uses
//! block helpers. HTML escaping is disabled: the output is Markdown.

use crate::diagnostics::DocResult;
use handlebars::Handlebars;

pub const HOME_PAGE: &str = r#"# {{project_name}} API Reference
Here are modules that make up [{{project_name}}]({{project_url}}):

{{contents}}

{{back_to_top}}
"#;

pub const OVERVIEW_PAGE: &str = r#"{{header_div}}

# Module Overview
> Module: **{{module_name}}**

{{description}}

{{members}}
"#;

pub const FIELDS_PAGE: &str = r#"{{header_div}}

# Fields within module
> Module: [{{module_name}}]({{module_api_url}})

Here are fields exposed in the module:

| Field | Value |
| --- | --- |
{{entries}}

{{back_to_top}}
"#;

pub const FUNCS_DOC_PAGE: &str = r#"{{header_div}}

# Functions within module
> Module: [{{module_name}}]({{module_api_url}})

Here are functions exposed in the module:
{{index_of_funcs}}

{{contents}}
"#;

pub const CLASS_DOC_PAGE: &str = r#"{{header_div}}

# Class {{class_name}}
> Module: [{{module_name}}]({{module_api_url}})
>
> Class: **{{class_name}}**
>
> Inheritance: {{inheritance}}

{{description}}

{{contents}}
"#;

pub const HEADER_DIV_1: &str = r#"###### {{project_name}} API Reference
[Home]({{home_url}}) | [Project]({{project_url}}) | Module | [Source]({{src_url}})"#;

pub const HEADER_DIV_2: &str = r#"###### {{project_name}} API Reference
[Home]({{home_url}}) | [Project]({{project_url}}) | [Module]({{api_url}}) | [Source]({{src_url}})"#;

pub const MODULE_LINE: &str = r#"[{{module_name}}]({{api_url}})
<br>
{{short_description}}"#;

pub const ALL_FUNCTIONS_SECTION: &str = r#"## Functions
- [**All functions**]({{funcs_page_url}})
{{contents}}

{{back_to_top}}"#;

pub const ALL_CLASSES_SECTION: &str = r#"## Classes
{{contents}}

{{back_to_top}}"#;

pub const ALL_FIELDS_SECTION: &str = r#"## Fields
- [**All fields**]({{fields_page_url}})
{{contents}}

{{back_to_top}}"#;

pub const FUNC_LINE: &str = r#"    - [{{name}}]({{doc_url}}): {{short_description}}"#;

pub const CLASS_SECTION: &str = r#"- [**{{name}}**]({{doc_url}}): {{short_description}}
{{contents}}"#;

pub const CLASS_MEMBER_LINE: &str = r#"    - [{{name}}]({{doc_url}}){{kv_sign}} {{short_description}}"#;

pub const FIELD_LINE: &str = r#"    - {{name}} = {{value}}"#;

pub const RECORD_FIELD_LINE: &str = r#"    - {{name}}: {{description}}"#;

pub const INDEX_LINE: &str = r#"- [{{name}}]({{url}})"#;

pub const TWO_COLUMNS_TABLE_ENTRY: &str = r#"| {{col1}} | {{col2}} |"#;

pub const THREE_COLUMNS_TABLE_ENTRY: &str = r#"| {{col1}} | {{col2}} | {{col3}} |"#;

pub const METHODS_SECTION: &str = r#"# Methods within class
Here are methods exposed in the class:
{{index_of_methods}}

{{contents}}"#;

pub const FUNC_DOC_SECTION: &str = r#"## {{func_name_1}}
{{description}}

```python
{{decorator}}def {{func_name_2}}{{signature}}:
    ...
```

{{contents}}"#;

pub const BACK_TO_TOP: &str = r#"<p align="right"><a href="{{href}}">Back to top</a></p>"#;

pub const FUNC_PARAMS_TABLE: &str = r#"| Parameter | Description |
| --- | --- |
{{contents}}"#;

pub const FUNC_EXCEPTIONS_SECTION: &str = r#"### Exceptions table
{{contents}}"#;

pub const FUNC_EXCEPTIONS_TABLE: &str = r#"| Exception | Circumstance |
| --- | --- |
{{contents}}"#;

pub const FUNC_RETURNS_LINE: &str = r#"### Value to return
{{text}}"#;

pub const FUNC_YIELDS_LINE: &str = r#"### Value to yield
{{text}}"#;

pub const FIELDS_EXPOSED_IN_CLASS: &str = r#"## Fields table
Here are fields exposed in the class:

| Field | Value |
| --- | --- |
{{contents}}

{{back_to_top}}"#;

pub const PROPERTIES_EXPOSED_IN_CLASS: &str = r#"## Properties table
Here are properties exposed in the class:

| Property | Methods | Description |
| --- | --- | --- |
{{contents}}

{{back_to_top}}"#;

pub const FIELDS_EXPOSED_IN_RECORD: &str = r#"## Fields table
Here are fields exposed in the class:

| Field | Description |
| --- | --- |
{{contents}}

{{back_to_top}}"#;

pub const FIELDS_EXPOSED_IN_ENUM: &str = r#"## Fields table
Here are fields exposed in the class:

| Field | Value |
| --- | --- |
{{contents}}

{{back_to_top}}"#;

/// Every template with its registry name
pub const TEMPLATES: &[(&str, &str)] = &[
    ("home_page", HOME_PAGE),
    ("overview_page", OVERVIEW_PAGE),
    ("fields_page", FIELDS_PAGE),
    ("funcs_doc_page", FUNCS_DOC_PAGE),
    ("class_doc_page", CLASS_DOC_PAGE),
    ("header_div_1", HEADER_DIV_1),
    ("header_div_2", HEADER_DIV_2),
    ("module_line", MODULE_LINE),
    ("all_functions_section", ALL_FUNCTIONS_SECTION),
    ("all_classes_section", ALL_CLASSES_SECTION),
    ("all_fields_section", ALL_FIELDS_SECTION),
    ("func_line", FUNC_LINE),
    ("class_section", CLASS_SECTION),
    ("class_member_line", CLASS_MEMBER_LINE),
    ("field_line", FIELD_LINE),
    ("record_field_line", RECORD_FIELD_LINE),
    ("index_line", INDEX_LINE),
    ("two_columns_table_entry", TWO_COLUMNS_TABLE_ENTRY),
    ("three_columns_table_entry", THREE_COLUMNS_TABLE_ENTRY),
    ("methods_section", METHODS_SECTION),
    ("func_doc_section", FUNC_DOC_SECTION),
    ("back_to_top", BACK_TO_TOP),
    ("func_params_table", FUNC_PARAMS_TABLE),
    ("func_exceptions_section", FUNC_EXCEPTIONS_SECTION),
    ("func_exceptions_table", FUNC_EXCEPTIONS_TABLE),
    ("func_returns_line", FUNC_RETURNS_LINE),
    ("func_yields_line", FUNC_YIELDS_LINE),
    ("fields_exposed_in_class", FIELDS_EXPOSED_IN_CLASS),
    ("properties_exposed_in_class", PROPERTIES_EXPOSED_IN_CLASS),
    ("fields_exposed_in_record", FIELDS_EXPOSED_IN_RECORD),
    ("fields_exposed_in_enum", FIELDS_EXPOSED_IN_ENUM),
];

/// Create a registry holding every template, with escaping disabled
pub fn registry() -> DocResult<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    for (name, template) in TEMPLATES {
        handlebars.register_template_string(name, *template)?;
    }

    Ok(handlebars)
}
