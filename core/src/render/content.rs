use super::html::component_anchor;
use super::Renderer;
use crate::document::{schema_ref_target, MediaType, RequestBody, Response};
use crate::markdown::MarkdownRenderer;
use indexmap::IndexMap;

/// How the shortcut to a referenced component is drawn.
#[derive(Clone, Copy)]
enum SchemaLink {
    /// `Schema: Pet` inline link, used under request bodies.
    Inline,
    /// `Show Pet Schema` button, used under responses.
    Button,
}

impl<M: MarkdownRenderer + ?Sized> Renderer<'_, M> {
    /// The request body section, or nothing when it has no media types.
    pub fn render_request_body(&self, body: Option<&RequestBody>) -> String {
        let Some(body) = body.filter(|b| !b.content.is_empty()) else {
            return String::new();
        };

        let mut html = String::from("<div class=\"section\"><h4>Request Body</h4>\n");
        html.push_str(&self.markdown(body.description.as_deref()));

        for (media, entry) in &body.content {
            html.push_str(&format!("<h5>Media Type: {}</h5>\n", self.text(media)));
            html.push_str(&self.render_media_type(entry, SchemaLink::Inline));
        }

        html.push_str("</div>\n");
        html
    }

    /// Every status code with its media types, or nothing when there are no
    /// responses.
    pub fn render_responses(
        &self,
        responses: &IndexMap<String, Response>,
        route: &str,
        method: &str,
    ) -> String {
        if responses.is_empty() {
            return String::new();
        }

        let mut html = format!(
            "<div class=\"responses\">\n<h4>Responses for <code>{}</code> <code>{}</code></h4>\n",
            self.text(&method.to_uppercase()),
            self.text(route)
        );

        for (code, response) in responses {
            let code = self.text(code);
            let description = response
                .description
                .as_deref()
                .map(|d| format!(" - {}", self.text(d)))
                .unwrap_or_default();
            html.push_str(&format!(
                "<div class=\"response response-{}\"><h5>Status: {}{}</h5>\n",
                code, code, description
            ));

            for (media, entry) in &response.content {
                html.push_str(&format!(
                    "<div class=\"media-type\"><h6>Media Type: {}</h6>\n",
                    self.text(media)
                ));
                html.push_str(&self.render_media_type(entry, SchemaLink::Button));
                html.push_str("</div>\n");
            }

            html.push_str("</div>\n");
        }

        html.push_str("</div>\n");
        html
    }

    /// Schema link (when the schema is a reference), raw schema, examples.
    fn render_media_type(&self, entry: &MediaType, link: SchemaLink) -> String {
        let mut html = String::new();

        if let Some(schema) = &entry.schema {
            if let Some(name) = schema_ref_target(schema) {
                let anchor = component_anchor(&name);
                let name = self.text(&name);
                let anchor = self.text(&anchor);
                html.push_str(&match link {
                    SchemaLink::Inline => format!(
                        "<p>Schema: <a href=\"#{}\" class=\"btn btn-sm btn-link\">{}</a></p>\n",
                        anchor, name
                    ),
                    SchemaLink::Button => format!(
                        "<a href=\"#{}\" class=\"btn btn-sm btn-outline-primary mb-2\">Show {} Schema</a>\n",
                        anchor, name
                    ),
                });
            }
            html.push_str(&self.json_block(schema));
            html.push('\n');
        }

        if let Some(example) = &entry.example {
            html.push_str("<h6>Example:</h6>");
            html.push_str(&self.json_block(example));
            html.push('\n');
        }

        for (name, example) in entry.examples.iter().flatten() {
            html.push_str(&format!("<h6>Example ({}):</h6>", self.text(name)));
            html.push_str(&self.json_block(example));
            html.push('\n');
        }

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EscapeMode;
    use crate::markdown::CommonMark;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn body(content: Value) -> RequestBody {
        serde_json::from_value(content).unwrap()
    }

    fn responses(value: Value) -> IndexMap<String, Response> {
        serde_json::from_value(value).unwrap()
    }

    /// Pulls every `<pre>` payload back out and parses it.
    fn dumped_json(html: &str) -> Vec<Value> {
        html.split("<pre>")
            .skip(1)
            .map(|chunk| serde_json::from_str(&chunk[..chunk.find("</pre>").unwrap()]).unwrap())
            .collect()
    }

    #[test]
    fn test_request_body_absent_or_empty() {
        let md = CommonMark::new();
        let renderer = Renderer::new(&md, EscapeMode::Trusted);
        assert_eq!(renderer.render_request_body(None), "");
        assert_eq!(renderer.render_request_body(Some(&RequestBody::default())), "");
        assert_eq!(
            renderer.render_request_body(Some(&body(json!({"description": "x", "content": {}})))),
            ""
        );
    }

    #[test]
    fn test_request_body_reference_links_and_dumps() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Foo"}}}
        }))));
        assert!(html.contains(
            "<p>Schema: <a href=\"#schema-Foo\" class=\"btn btn-sm btn-link\">Foo</a></p>"
        ));
        assert!(html.contains("$ref"));
        assert_eq!(
            dumped_json(&html),
            vec![json!({"$ref": "#/components/schemas/Foo"})]
        );
    }

    #[test]
    fn test_reference_with_siblings_keeps_everything() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "content": {"application/json": {"schema": {
                "$ref": "#/components/schemas/Foo",
                "description": "Overridden"
            }}}
        }))));
        assert!(html.contains("href=\"#schema-Foo\""));
        assert_eq!(
            dumped_json(&html),
            vec![json!({"$ref": "#/components/schemas/Foo", "description": "Overridden"})]
        );
    }

    #[test]
    fn test_inline_schema_has_no_link() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "content": {"text/plain": {"schema": {"type": "string"}}}
        }))));
        assert!(!html.contains("href="));
        assert_eq!(dumped_json(&html), vec![json!({"type": "string"})]);
    }

    #[test]
    fn test_request_body_media_types_in_order() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "description": "The *pet*.",
            "content": {
                "application/xml": {},
                "application/json": {},
                "text/plain": {}
            }
        }))));
        assert!(html.contains("<p>The <em>pet</em>.</p>"));
        assert_eq!(html.matches("<h5>Media Type:").count(), 3);
        let xml = html.find("application/xml").unwrap();
        let json = html.find("application/json").unwrap();
        let text = html.find("text/plain").unwrap();
        assert!(xml < json && json < text);
    }

    #[test]
    fn test_examples_round_trip() {
        let md = CommonMark::new();
        let single = json!({"id": 1, "tags": ["a", "b"], "nested": {"ok": true}});
        let named_a = json!({"value": [1, 2, 3]});
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "content": {"application/json": {
                "example": single,
                "examples": {"first": named_a, "falsy": 0}
            }}
        }))));
        assert!(html.contains("<h6>Example:</h6>"));
        assert!(html.contains("<h6>Example (first):</h6>"));
        assert!(html.contains("<h6>Example (falsy):</h6>"));
        assert_eq!(dumped_json(&html), vec![single, named_a, json!(0)]);
    }

    #[test]
    fn test_falsy_single_example_is_rendered() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_request_body(Some(&body(json!({
            "content": {"application/json": {"example": false}}
        }))));
        assert_eq!(html.matches("<h6>Example:</h6>").count(), 1);
        assert_eq!(dumped_json(&html), vec![json!(false)]);
    }

    #[test]
    fn test_responses_empty() {
        let md = CommonMark::new();
        let renderer = Renderer::new(&md, EscapeMode::Trusted);
        assert_eq!(renderer.render_responses(&IndexMap::new(), "/pets", "get"), "");
    }

    #[test]
    fn test_responses_block() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_responses(
            &responses(json!({
                "200": {
                    "description": "A pet",
                    "content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/Pet"},
                        "example": {"name": "Rex"}
                    }}
                },
                "404": {}
            })),
            "/pets/{id}",
            "get",
        );
        assert!(html.contains("<h4>Responses for <code>GET</code> <code>/pets/{id}</code></h4>"));
        assert!(html.contains("<h5>Status: 200 - A pet</h5>"));
        assert!(html.contains("<h5>Status: 404</h5>"));
        assert!(html.contains(
            "<a href=\"#schema-Pet\" class=\"btn btn-sm btn-outline-primary mb-2\">Show Pet Schema</a>"
        ));
        assert_eq!(
            dumped_json(&html),
            vec![json!({"$ref": "#/components/schemas/Pet"}), json!({"name": "Rex"})]
        );
        assert!(html.find("Status: 200").unwrap() < html.find("Status: 404").unwrap());
    }

    #[test]
    fn test_response_media_type_count_matches_keys() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Trusted).render_responses(
            &responses(json!({"200": {"content": {
                "application/json": {}, "application/xml": {}
            }}})),
            "/a",
            "post",
        );
        assert_eq!(html.matches("<h6>Media Type:").count(), 2);
    }

    #[test]
    fn test_escaped_mode_escapes_names_and_dumps() {
        let md = CommonMark::new();
        let html = Renderer::new(&md, EscapeMode::Escaped).render_responses(
            &responses(json!({"200": {"description": "<ok>", "content": {"text/html": {
                "example": "<p>hi</p>"
            }}}})),
            "/a",
            "get",
        );
        assert!(html.contains("Status: 200 - &lt;ok&gt;"));
        assert!(html.contains("<pre>&quot;&lt;p&gt;hi&lt;/p&gt;&quot;</pre>"));
    }
}
