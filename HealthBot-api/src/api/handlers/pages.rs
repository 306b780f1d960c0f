use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");
const CHAT_HTML: &str = include_str!("../../../templates/chat.html");

/// Landing page with the chat widget
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Full-page chat UI
pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_HTML)
}
