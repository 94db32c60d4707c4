/// Characters that are not allowed in a folder or file name segment.
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Makes a name safe to use as a single path segment.
///
/// - Replaces each of `< > : " / \ | ? *` with `_`
/// - Collapses runs of underscores into one
/// - Trims leading/trailing spaces and underscores
pub fn sanitize_name(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if FORBIDDEN_CHARS.contains(&c) { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    compacted.trim_matches(&[' ', '_'][..]).to_string()
}
