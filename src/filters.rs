use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
    ToTrainCase,
};
use minijinja::Environment;
use uuid::Uuid;

/// Namespace for deterministic document identifiers.
const DOCUMENT_NS_NAME: &str = "template-parser.docx";

/// Registers the case-conversion filters and the `uuid_generate` helper.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("titlecase", titlecase);
    env.add_filter("camelcase", camelcase);
    env.add_filter("pascalcase", pascalcase);
    env.add_filter("snakecase", snakecase);
    env.add_filter("kebabcase", kebabcase);
    env.add_filter("traincase", traincase);
    env.add_filter("screamingsnakecase", screamingsnakecase);
    env.add_filter("uuid_generate", uuid_generate);
    env.add_function("uuid_generate", uuid_generate);
}

pub fn titlecase(s: String) -> String {
    s.to_title_case()
}

pub fn camelcase(s: String) -> String {
    s.to_lower_camel_case()
}

pub fn pascalcase(s: String) -> String {
    s.to_pascal_case()
}

pub fn snakecase(s: String) -> String {
    s.to_snake_case()
}

pub fn kebabcase(s: String) -> String {
    s.to_kebab_case()
}

pub fn traincase(s: String) -> String {
    s.to_train_case()
}

pub fn screamingsnakecase(s: String) -> String {
    s.to_shouty_snake_case()
}

/// Same input, same UUID (v5); no input gives a fresh random one (v4).
pub fn uuid_generate(val: Option<String>) -> String {
    let ns = Uuid::new_v5(&Uuid::NAMESPACE_DNS, DOCUMENT_NS_NAME.as_bytes());
    match val {
        Some(s) if !s.is_empty() => Uuid::new_v5(&ns, s.as_bytes()).to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_filters() {
        assert_eq!(titlecase("quarterly_report".into()), "Quarterly Report");
        assert_eq!(camelcase("Invoice Number".into()), "invoiceNumber");
        assert_eq!(pascalcase("invoice number".into()), "InvoiceNumber");
        assert_eq!(snakecase("InvoiceNumber".into()), "invoice_number");
        assert_eq!(kebabcase("Invoice Number".into()), "invoice-number");
        assert_eq!(traincase("invoice number".into()), "Invoice-Number");
        assert_eq!(screamingsnakecase("invoice number".into()), "INVOICE_NUMBER");
    }

    #[test]
    fn test_uuid_generate_is_deterministic_for_input() {
        let a = uuid_generate(Some("contract-42".into()));
        let b = uuid_generate(Some("contract-42".into()));
        assert_eq!(a, b);
        assert_ne!(a, uuid_generate(Some("contract-43".into())));
    }

    #[test]
    fn test_uuid_generate_random_without_input() {
        let a = uuid_generate(None);
        assert_eq!(a.len(), 36);
        assert_ne!(a, uuid_generate(Some(String::new())));
    }

    #[test]
    fn test_registered_in_environment() {
        let mut env = Environment::new();
        register(&mut env);
        let out = env
            .render_str("{{ 'client name' | pascalcase }}", ())
            .unwrap();
        assert_eq!(out, "ClientName");
    }
}
