//! HTML view rendering.

use entities::SessionUser;
use tera::{Context, Tera};

/// Template environment mapping logical view names to rendered HTML.
///
/// Loaded once at startup from the configured template directory.
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Loads every `.html` template under `templates_dir`.
    pub fn load(templates_dir: &str) -> Result<Self, tera::Error> {
        let glob = format!("{}/**/*.html", templates_dir);
        let tera = Tera::new(&glob)?;
        Ok(Self { tera })
    }

    /// Renders the named view with the given context.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

/// Builds the base context every page receives: the current session (or
/// null) and an optional error message.
pub fn page_context(user: Option<&SessionUser>, error: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("user", &user);
    context.insert("error", &error);
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_context_defaults() {
        let context = page_context(None, None);

        assert_eq!(context.get("user"), Some(&tera::Value::Null));
        assert_eq!(context.get("error"), Some(&tera::Value::Null));
    }

    #[test]
    fn test_page_context_with_error() {
        let context = page_context(None, Some("All fields are required."));

        assert_eq!(
            context.get("error"),
            Some(&tera::Value::String("All fields are required.".to_string()))
        );
    }
}
