//! Display labels for wire identifiers

/// Turn a hyphenated slug into a title-cased label
///
/// `"heart-health"` becomes `"Heart Health"`. Empty segments are dropped and
/// the result does not depend on the process locale.
pub fn humanize(slug: &str) -> String {
    slug.split('-')
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
