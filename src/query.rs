//! Query builder — turns loosely structured search intent into the
//! natural-language search string the portal's search box expects.

use serde::Deserialize;

/// Search intent from the request body. At least one field must carry a
/// usable value or the request is rejected upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    pub category: Option<String>,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    pub profession: Option<String>,
    pub state: Option<String>,
    /// Income ceiling in rupees. Zero counts as absent.
    pub income: Option<f64>,
}

/// Build the search string, or `None` when no field is usable.
///
/// Clauses are appended in a fixed order regardless of which subset is
/// present, joined with single spaces, whitespace-normalized, and the first
/// character of whichever clause ends up first is capitalized. Empty and
/// whitespace-only strings count as absent, as does a zero income.
pub fn build_query(criteria: &SearchCriteria) -> Option<String> {
    let user = criteria.user.as_ref();

    let mut parts: Vec<String> = Vec::new();
    if let Some(category) = present(criteria.category.as_deref()) {
        parts.push(format!("schemes related to {}", category.to_lowercase()));
    }
    if let Some(profession) = present(user.and_then(|u| u.profession.as_deref())) {
        parts.push(format!("for {} professionals", profession.to_lowercase()));
    }
    if let Some(state) = present(user.and_then(|u| u.state.as_deref())) {
        parts.push(format!("in {state}"));
    }
    if let Some(income) = user.and_then(|u| u.income).filter(|i| *i != 0.0) {
        parts.push(format!("with income under {income}"));
    }

    if parts.is_empty() {
        return None;
    }

    let normalized = parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Some(capitalize_first(&normalized))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
