use std::sync::Arc;

use axum::{extract::State, Json};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    game::{GridGenerator, SelectionMatcher},
    models::{Grid, GridOptions, Position},
    routes::ApiError,
    utils::words::{find_invalid_word, normalize_word_list, normalize_words},
    AppState,
};

/// Word list as sent by the puzzle author: either a JSON array or the raw
/// comma separated text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WordList {
    List(Vec<String>),
    Text(String),
}

impl WordList {
    fn normalize(&self) -> Vec<String> {
        match self {
            WordList::List(words) => normalize_word_list(words),
            WordList::Text(raw) => normalize_words(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub words: WordList,
    pub grid_size: Option<usize>,
    #[serde(default)]
    pub options: GridOptions,
    /// Fixes all randomness, so identical requests return identical grids
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub grid: Grid,
    pub words: Vec<String>,
    pub grid_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub grid: Vec<Vec<char>>,
    pub path: Vec<Position>,
    pub words: Vec<String>,
    #[serde(default)]
    pub solved_words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(rename = "match")]
    pub matched: Option<String>,
}

/// Generate a new puzzle grid from the author's word list
pub async fn generate_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let limits = &state.config.generator;

    let words = payload.words.normalize();
    if words.is_empty() {
        return Err(ApiError::BadRequest("At least one word is required".to_string()));
    }
    if let Some(word) = find_invalid_word(&words) {
        return Err(ApiError::BadRequest(format!(
            "The word \"{}\" may only contain the letters A-Z",
            word
        )));
    }
    if words.len() > limits.max_words {
        return Err(ApiError::BadRequest(format!(
            "Too many words: {} given, at most {} allowed",
            words.len(),
            limits.max_words
        )));
    }

    let grid_size = payload.grid_size.unwrap_or(limits.default_grid_size);
    if grid_size < limits.min_grid_size || grid_size > limits.max_grid_size {
        return Err(ApiError::BadRequest(format!(
            "Grid size must be between {} and {}",
            limits.min_grid_size, limits.max_grid_size
        )));
    }

    tracing::info!(
        "Generating {}x{} puzzle with {} words (diagonal: {}, reverse: {})",
        grid_size,
        grid_size,
        words.len(),
        payload.options.allow_diagonal,
        payload.options.allow_reverse
    );

    let grid = match payload.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            GridGenerator::generate_with_rng(&words, grid_size, payload.options, &mut rng)?
        }
        None => GridGenerator::generate(&words, grid_size, payload.options)?,
    };
    tracing::debug!("Generated grid:\n{}", grid.to_rows().join("\n"));

    Ok(Json(GenerateResponse {
        grid,
        words,
        grid_size,
    }))
}

/// Check a dragged selection against the puzzle's unsolved words
pub async fn check_selection(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let max_size = state.config.generator.max_grid_size;
    if payload.grid.len() > max_size {
        return Err(ApiError::BadRequest(format!(
            "Grid size must be at most {}",
            max_size
        )));
    }
    // A straight line can't cover more cells than a grid side
    if payload.path.len() > max_size {
        return Err(ApiError::BadRequest(format!(
            "Selection is longer than {} cells",
            max_size
        )));
    }

    let grid = Grid::from_rows(payload.grid)?;
    let matched = SelectionMatcher::match_selection(
        &grid,
        &payload.path,
        &payload.words,
        &payload.solved_words,
    );

    tracing::debug!(
        "Checked {}-cell selection on {}x{} grid: {:?}",
        payload.path.len(),
        grid.size(),
        grid.size(),
        matched
    );

    Ok(Json(CheckResponse { matched }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GeneratorConfig, ServerConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(AppState {
            config: Config {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                },
                generator: GeneratorConfig::default(),
            },
        });
        crate::routes::create_routes().with_state(state)
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_generate_normalizes_and_places_words() {
        let (status, body) = post(
            "/api/puzzles/generate",
            json!({
                "words": " cat, dog ,cat,, bird",
                "gridSize": 6,
                "options": { "allowDiagonal": true, "allowReverse": true }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["words"], json!(["CAT", "DOG", "BIRD"]));
        assert_eq!(body["gridSize"], 6);

        let grid: Grid = serde_json::from_value(body["grid"].clone()).unwrap();
        assert_eq!(grid.size(), 6);
        for word in ["CAT", "DOG", "BIRD"] {
            assert!(grid.find_word(word).is_some(), "{} not in grid", word);
        }
    }

    #[tokio::test]
    async fn test_generate_uses_default_size_and_options() {
        let (status, body) = post("/api/puzzles/generate", json!({ "words": ["rust"] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gridSize"], 8);
        assert_eq!(body["grid"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_generate_with_seed_is_repeatable() {
        let request = json!({
            "words": ["MARS", "VENUS", "EARTH"],
            "gridSize": 7,
            "options": { "allowDiagonal": true, "allowReverse": true },
            "seed": 1234
        });
        let (_, first) = post("/api/puzzles/generate", request.clone()).await;
        let (_, second) = post("/api/puzzles/generate", request).await;
        assert_eq!(first["grid"], second["grid"]);
    }

    #[tokio::test]
    async fn test_generate_reports_unplaceable_word() {
        let (status, body) = post(
            "/api/puzzles/generate",
            json!({ "words": ["HIPPOPOTAMUS"], "gridSize": 6 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("\"HIPPOPOTAMUS\""));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_word_list() {
        let (status, body) = post("/api/puzzles/generate", json!({ "words": " , " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_rejects_size_out_of_range() {
        let (status, _) = post(
            "/api/puzzles/generate",
            json!({ "words": ["CAT"], "gridSize": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(
            "/api/puzzles/generate",
            json!({ "words": ["CAT"], "gridSize": 500 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_matches_reversed_drag() {
        let (status, body) = post(
            "/api/puzzles/check",
            json!({
                "grid": [["C", "A", "T"], ["X", "X", "X"], ["X", "X", "X"]],
                "path": [{ "row": 0, "col": 2 }, { "row": 0, "col": 1 }, { "row": 0, "col": 0 }],
                "words": ["CAT"],
                "solvedWords": []
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match"], "CAT");
    }

    #[tokio::test]
    async fn test_check_returns_null_for_bent_path() {
        let (status, body) = post(
            "/api/puzzles/check",
            json!({
                "grid": [["C", "A", "X"], ["X", "T", "X"], ["X", "X", "X"]],
                "path": [{ "row": 0, "col": 0 }, { "row": 0, "col": 1 }, { "row": 1, "col": 1 }],
                "words": ["CAT"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match"], Value::Null);
    }

    #[tokio::test]
    async fn test_check_rejects_ragged_grid() {
        let (status, body) = post(
            "/api/puzzles/check",
            json!({
                "grid": [["C", "A"], ["T"]],
                "path": [{ "row": 0, "col": 0 }],
                "words": ["C"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid grid"));
    }

    #[tokio::test]
    async fn test_generate_rejects_words_with_non_letters() {
        for word in ["ice cream", "café", "r2d2"] {
            let (status, body) = post(
                "/api/puzzles/generate",
                json!({ "words": [word, "cat"], "gridSize": 10, "seed": 1 }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} accepted", word);
            let expected = format!("\"{}\"", word.to_uppercase());
            assert!(body["error"].as_str().unwrap().contains(&expected));
        }
    }

    #[tokio::test]
    async fn test_generated_grid_passes_check() {
        let (status, body) = post(
            "/api/puzzles/generate",
            json!({ "words": "sun, moon, star", "gridSize": 6, "seed": 9 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post(
            "/api/puzzles/check",
            json!({
                "grid": body["grid"],
                "path": [{ "row": 0, "col": 0 }],
                "words": body["words"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("match").is_some());
    }

    #[tokio::test]
    async fn test_check_rejects_oversized_grid() {
        let row = vec!["A"; 21];
        let grid = vec![row; 21];
        let (status, _) = post(
            "/api/puzzles/check",
            json!({ "grid": grid, "path": [{ "row": 0, "col": 0 }], "words": ["A"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_rejects_overlong_path() {
        let path: Vec<Value> = (0..21).map(|col| json!({ "row": 0, "col": col })).collect();
        let (status, body) = post(
            "/api/puzzles/check",
            json!({ "grid": [["A"]], "path": path, "words": ["A"] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Selection is longer"));
    }
}
