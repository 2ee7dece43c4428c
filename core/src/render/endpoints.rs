use super::Renderer;
use crate::document::{Operation, Parameter, Paths};
use crate::markdown::MarkdownRenderer;

impl<M: MarkdownRenderer + ?Sized> Renderer<'_, M> {
    /// Every route, then every operation under it, in document order.
    pub fn render_endpoints(&self, paths: &Paths) -> String {
        let mut html = String::from("<h2>API Endpoints</h2>\n");

        for (route, item) in &paths.items {
            html.push_str(&format!(
                "<div class=\"endpoint\"><h3>Path: <code>{}</code></h3>\n",
                self.text(route)
            ));

            for (method, operation) in &item.operations {
                let parameters = merge_parameters(&item.parameters, &operation.parameters);
                html.push_str(&self.render_operation(route, method, operation, &parameters));
            }

            html.push_str("</div>\n");
        }

        tracing::debug!(routes = paths.items.len(), "rendered endpoints");
        html
    }

    fn render_operation(
        &self,
        route: &str,
        method: &str,
        operation: &Operation,
        parameters: &[Parameter],
    ) -> String {
        let method_class = method.to_ascii_lowercase();
        let mut html = format!(
            "<div class=\"operation\">\n<span class=\"method {}\">{}</span>\n<strong>{}</strong>\n",
            self.text(&method_class),
            self.text(method),
            self.text(operation.summary.as_deref().unwrap_or_default())
        );

        html.push_str(&self.markdown(operation.description.as_deref()));
        if let Some(id) = &operation.operation_id {
            html.push_str(&format!(
                "<p><strong>Operation ID:</strong> {}</p>\n",
                self.text(id)
            ));
        }
        if let Some(tags) = operation.tags.as_ref().filter(|tags| !tags.is_empty()) {
            html.push_str(&format!(
                "<p><strong>Tags:</strong> {}</p>\n",
                self.text(&tags.join(", "))
            ));
        }

        html.push_str(&self.render_parameters(parameters));
        html.push_str(&self.render_request_body(operation.request_body.as_ref()));
        html.push_str(&self.render_responses(&operation.responses, route, method));

        html.push_str("</div>\n");
        html
    }

    /// A parameter table, or nothing for an empty list.
    pub fn render_parameters(&self, parameters: &[Parameter]) -> String {
        if parameters.is_empty() {
            return String::new();
        }

        let mut rows = String::new();
        for param in parameters {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                self.text(&param.name),
                self.text(&param.location),
                self.text(&param.resolved_type()),
                if param.required { "Yes" } else { "No" },
                self.markdown(param.description.as_deref())
            ));
        }

        format!(
            "<div class=\"section\">\n<h4>Parameters</h4>\n\
             <table class=\"table table-sm\">\n\
             <thead><tr><th>Name</th><th>In</th><th>Type</th><th>Required</th><th>Description</th></tr></thead>\n\
             <tbody>\n{}</tbody>\n</table>\n</div>\n",
            rows
        )
    }
}

/// Path-level parameters followed by operation-level ones. An operation
/// parameter with the same `(name, in)` replaces the inherited one.
fn merge_parameters(inherited: &[Parameter], own: &[Parameter]) -> Vec<Parameter> {
    inherited
        .iter()
        .filter(|p| !own.iter().any(|o| o.key() == p.key()))
        .chain(own)
        .cloned()
        .collect()
}
