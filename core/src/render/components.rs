use super::html::{capitalize, component_anchor};
use super::Renderer;
use crate::document::Components;
use crate::markdown::MarkdownRenderer;
use serde_json::Value;

impl<M: MarkdownRenderer + ?Sized> Renderer<'_, M> {
    /// One section per category, one anchored block per component.
    pub fn render_components(&self, components: &Components) -> String {
        if components.is_empty() {
            return String::new();
        }

        let mut html = String::from("<h2>Components</h2>\n");
        for (category, items) in &components.categories {
            html.push_str(&format!(
                "<div class=\"component-section\"><h3>{}</h3>\n",
                self.text(&capitalize(category))
            ));

            for (name, component) in items {
                let description = component.get("description").and_then(Value::as_str);
                html.push_str(&format!(
                    "<div class=\"section\" id=\"{}\">\n<h4>{} Schema</h4>\n{}{}\n</div>\n",
                    self.text(&component_anchor(name)),
                    self.text(name),
                    self.markdown(description),
                    self.json_block(component)
                ));
            }

            html.push_str("</div>\n");
        }

        tracing::debug!(categories = components.categories.len(), "rendered components");
        html
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EscapeMode;
    use crate::document::Document;
    use crate::markdown::CommonMark;
    use crate::render::Renderer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(doc: serde_json::Value) -> String {
        let document = Document::from_value(doc).unwrap();
        let md = CommonMark::new();
        Renderer::new(&md, EscapeMode::Trusted).render_components(&document.components)
    }

    #[test]
    fn test_no_components_renders_nothing() {
        assert_eq!(render(json!({"info": {"title": "T"}})), "");
        assert_eq!(render(json!({"info": {"title": "T"}, "components": {}})), "");
    }

    #[test]
    fn test_component_block() {
        let html = render(json!({
            "info": {"title": "T"},
            "components": {"schemas": {"Pet": {
                "description": "A **pet**.",
                "type": "object"
            }}}
        }));
        assert_eq!(
            html,
            "<h2>Components</h2>\n\
             <div class=\"component-section\"><h3>Schemas</h3>\n\
             <div class=\"section\" id=\"schema-Pet\">\n\
             <h4>Pet Schema</h4>\n\
             <p>A <strong>pet</strong>.</p>\n\
             <pre>{\n  \"description\": \"A **pet**.\",\n  \"type\": \"object\"\n}</pre>\n\
             </div>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_categories_and_names_keep_document_order() {
        let html = render(json!({
            "info": {"title": "T"},
            "components": {
                "schemas": {"Zebra": {}, "Apple": {}},
                "responses": {"NotFound": {"description": "Missing"}}
            }
        }));
        let schemas = html.find("<h3>Schemas</h3>").unwrap();
        let responses = html.find("<h3>Responses</h3>").unwrap();
        let zebra = html.find("id=\"schema-Zebra\"").unwrap();
        let apple = html.find("id=\"schema-Apple\"").unwrap();
        assert!(schemas < zebra && zebra < apple && apple < responses);
        assert!(html.contains("id=\"schema-NotFound\""));
    }
}
