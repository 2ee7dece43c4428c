use super::Renderer;
use crate::document::Info;
use crate::markdown::MarkdownRenderer;

/// Shown when `info.version` is absent.
const MISSING_VERSION: &str = "N/A";

impl<M: MarkdownRenderer + ?Sized> Renderer<'_, M> {
    /// Title heading, markdown description, version line.
    pub fn render_info(&self, info: &Info) -> String {
        let mut html = format!("<h1 class=\"display-4\">{}</h1>\n", self.text(&info.title));
        html.push_str(&self.markdown(info.description.as_deref()));
        html.push_str(&format!(
            "<p><strong>Version:</strong> {}</p>\n",
            self.text(info.version.as_deref().unwrap_or(MISSING_VERSION))
        ));
        html
    }
}
