/// A post with every field the theme uses.
pub fn full_post(title: &str, category: &str) -> String {
    format!(
        "---\ntitle: {title}\ndate: 2024-03-01\ncategory: {category}\n---\n\n\
         ## Overview\n\nSome *text* with a [link](https://example.com).\n"
    )
}

/// A post relying on the slug and category defaults.
pub fn minimal_post(title: &str) -> String {
    format!("title: {title}\ndate: 2024-01-01\n\nBody of {title}.\n")
}

/// A post without the mandatory date.
pub fn undated_post() -> &'static str {
    "title: Draft\n\nNot ready.\n"
}
