//! Illustration prompts.

/// Appended to every illustration request.
pub const STYLE_DIRECTIVE: &str = "Style: a gentle children's picture-book illustration. \
Bright, warm and cheerful colours with soft shapes. Safe and friendly for children aged 3 to 8. \
Nothing frightening, dark or violent. Do not include any text, letters or captions in the image.";

/// Added when the previous page's illustration is attached.
pub const CONTINUITY_DIRECTIVE: &str = "The attached image is the illustration from the previous page. \
Keep the same art style, colour palette and character designs so the pages read as one book.";

/// Build the prompt for one page's illustration.
///
/// # Examples
///
/// ```
/// use storyteller_story::{STYLE_DIRECTIVE, illustration_prompt};
///
/// let prompt = illustration_prompt("A rabbit hops through the meadow.", false);
/// assert!(prompt.contains("A rabbit hops"));
/// assert!(prompt.ends_with(STYLE_DIRECTIVE));
/// ```
pub fn illustration_prompt(scene_text: &str, with_reference: bool) -> String {
    let mut prompt = format!(
        "Draw one illustration for this page of a children's story:\n\n{}\n\n",
        scene_text.trim()
    );
    if with_reference {
        prompt.push_str(CONTINUITY_DIRECTIVE);
        prompt.push_str("\n\n");
    }
    prompt.push_str(STYLE_DIRECTIVE);
    prompt
}
