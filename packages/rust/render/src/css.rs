//! CSS custom properties derived from a brand.

use awesauce_shared::Brand;

/// `--font-stack` from the brand's first font, then one `--color-<use>` per color.
///
/// The font part is left out when the brand has no fonts.
pub fn css_variables_from(brand: &Brand) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(brand.colors.len() + 1);
    if let Some(font) = brand.fonts.first() {
        parts.push(format!("--font-stack: {};", font.stack));
    }
    parts.extend(
        brand
            .colors
            .iter()
            .map(|color| format!("--color-{}: {};", color.use_tag, color.hex)),
    );
    parts.join(" ")
}
