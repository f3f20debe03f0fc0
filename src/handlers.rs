pub mod analytics;
pub mod bookings;

use axum::{extract::Query, http::Uri};

/// Primeiro valor de `key` na query string. Repetições e pares ilegíveis não
/// rejeitam a requisição: quem chama aplica o padrão.
pub(crate) fn first_query_param(query: Option<&str>, key: &str) -> Option<String> {
    let uri: Uri = format!("/?{}", query?).parse().ok()?;
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).ok()?;
    pairs
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::first_query_param;

    #[test]
    fn first_value_wins_on_repeated_keys() {
        let query = Some("period=week&period=day");
        assert_eq!(first_query_param(query, "period").as_deref(), Some("week"));
    }

    #[test]
    fn missing_key_or_query_is_none() {
        assert_eq!(first_query_param(Some("foo=bar"), "period"), None);
        assert_eq!(first_query_param(None, "period"), None);
    }

    #[test]
    fn values_are_percent_decoded() {
        let term = first_query_param(Some("q=Maria%20da+Silva"), "q");
        assert_eq!(term.as_deref(), Some("Maria da Silva"));
    }
}
