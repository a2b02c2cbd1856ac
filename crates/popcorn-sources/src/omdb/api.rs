use popcorn_models::{parse_runtime_minutes, MovieDetail, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Language", default)]
    language: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Writer", default)]
    writer: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

impl From<OmdbSearchItem> for SearchResult {
    fn from(item: OmdbSearchItem) -> Self {
        SearchResult {
            imdb_id: item.imdb_id,
            title: item.title,
            poster_url: item.poster,
            year: item.year,
        }
    }
}

impl From<OmdbMovie> for MovieDetail {
    fn from(movie: OmdbMovie) -> Self {
        MovieDetail {
            runtime_minutes: parse_runtime_minutes(&movie.runtime),
            imdb_id: movie.imdb_id,
            title: movie.title,
            poster_url: movie.poster,
            year: movie.year,
            imdb_rating: movie.imdb_rating,
            country: movie.country,
            language: movie.language,
            plot: movie.plot,
            actors: movie.actors,
            director: movie.director,
            writer: movie.writer,
            released: movie.released,
            genre: movie.genre,
        }
    }
}

/// Check the `Response` flag shared by every OMDb payload.
fn check_envelope(value: &serde_json::Value) -> Result<(), CatalogError> {
    let envelope: OmdbEnvelope = serde_json::from_value(value.clone())
        .map_err(|e| CatalogError::Parse(format!("missing Response flag: {}", e)))?;

    match envelope.response.as_str() {
        "True" => Ok(()),
        "False" => Err(CatalogError::NotFound(
            envelope.error.unwrap_or_else(|| "Movie not found!".to_string()),
        )),
        other => Err(CatalogError::Parse(format!("unexpected Response value '{}'", other))),
    }
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CatalogError::Parse(format!("search response is not JSON: {}", e)))?;
    check_envelope(&value)?;

    let response: OmdbSearchResponse = serde_json::from_value(value)
        .map_err(|e| CatalogError::Parse(format!("Failed to parse search results: {}", e)))?;

    Ok(response.search.into_iter().map(SearchResult::from).collect())
}

pub fn parse_detail_response(body: &str) -> Result<MovieDetail, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CatalogError::Parse(format!("detail response is not JSON: {}", e)))?;
    check_envelope(&value)?;

    let movie: OmdbMovie = serde_json::from_value(value)
        .map_err(|e| CatalogError::Parse(format!("Failed to parse movie details: {}", e)))?;

    Ok(movie.into())
}

async fn get_body(
    client: &Client,
    base_url: &str,
    params: &[(&str, &str)],
) -> Result<String, CatalogError> {
    let url = format!("{}/", base_url.trim_end_matches('/'));

    let response = client.get(&url).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(CatalogError::Api {
            status: status.as_u16(),
            message: error_text,
        });
    }

    Ok(response.text().await?)
}

/// Search OMDb by title text.
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, CatalogError> {
    debug!("OMDb search: query='{}'", query);
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let results = parse_search_response(&body)?;
    debug!("OMDb search '{}' returned {} results", query, results.len());
    Ok(results)
}

/// Fetch one movie by IMDb id.
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, CatalogError> {
    debug!("OMDb get movie: id={}", imdb_id);
    let body = get_body(
        client,
        base_url,
        &[("apikey", api_key), ("i", imdb_id), ("plot", "full")],
    )
    .await?;
    parse_detail_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "Search": [
            {"Title": "Fast & Furious", "Year": "2009", "imdbID": "tt1013752", "Type": "movie", "Poster": "https://m.media-amazon.com/images/M/a.jpg"},
            {"Title": "Fast Five", "Year": "2011", "imdbID": "tt1596343", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "412",
        "Response": "True"
    }"#;

    const DETAIL_BODY: &str = r#"{
        "Title": "Fast Five", "Year": "2011", "Rated": "PG-13", "Released": "29 Apr 2011",
        "Runtime": "130 min", "Genre": "Action, Crime, Thriller", "Director": "Justin Lin",
        "Writer": "Chris Morgan, Gary Scott Thompson", "Actors": "Vin Diesel, Paul Walker, Dwayne Johnson",
        "Plot": "Dominic Toretto and his crew of street racers plan a massive heist.",
        "Language": "English, Portuguese", "Country": "United States, Japan",
        "Poster": "https://m.media-amazon.com/images/M/b.jpg",
        "imdbRating": "7.3", "imdbID": "tt1596343", "Type": "movie", "Response": "True"
    }"#;

    #[test]
    fn test_parse_search_response() {
        let results = parse_search_response(SEARCH_BODY).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].imdb_id, "tt1013752");
        assert_eq!(results[1].title, "Fast Five");
        assert_eq!(results[1].poster_url, "N/A");
    }

    #[test]
    fn test_parse_search_not_found() {
        let err = parse_search_response(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap_err();
        match err {
            CatalogError::NotFound(msg) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_too_many_results_is_not_found() {
        let err = parse_search_response(r#"{"Response":"False","Error":"Too many results."}"#).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_detail_response() {
        let detail = parse_detail_response(DETAIL_BODY).unwrap();
        assert_eq!(detail.imdb_id, "tt1596343");
        assert_eq!(detail.runtime_minutes, 130);
        assert_eq!(detail.imdb_rating, "7.3");
        assert_eq!(detail.director, "Justin Lin");
        assert_eq!(detail.genre, "Action, Crime, Thriller");
    }

    #[test]
    fn test_parse_detail_missing_runtime() {
        let body = r#"{"Title":"Short","Year":"2020","imdbID":"tt0000001","Runtime":"N/A","imdbRating":"N/A","Response":"True"}"#;
        let detail = parse_detail_response(body).unwrap();
        assert_eq!(detail.runtime_minutes, 0);
        assert_eq!(detail.imdb_rating_value(), 0.0);
        assert!(detail.plot.is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_search_response("<html>"), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_detail_response(r#"{"Title":"x"}"#), Err(CatalogError::Parse(_))));
    }
}
