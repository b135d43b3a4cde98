/// Prompt sent to the generator for a product search term.
pub fn product_prompt(term: &str) -> String {
    format!(
        "Professional product photography of {}, white background, studio lighting, \
         high resolution, photorealistic, 4k. Ensure the product is centered and clearly visible.",
        term
    )
}
