/// Reduces a raw label fragment to the key used against the reference store.
///
/// Parenthesis characters are dropped but their contents stay in place, and
/// anything after the first comma is discarded.
pub fn normalize_ingredient(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let flattened = lowered.replace(['(', ')'], "");
    let lead = flattened.split(',').next().unwrap_or_default();
    lead.trim().to_string()
}
