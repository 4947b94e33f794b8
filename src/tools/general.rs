/// Look the query up in the built-in knowledge base (a placeholder).
pub fn faq(query: &str) -> String {
    format!("[KB] Answer to '{query}': This is a placeholder knowledge base response.")
}
