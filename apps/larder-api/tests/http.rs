use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use larder_api::{routes, state::AppState};
use larder_domain::RecipeCandidate;
use larder_service::LarderService;
use larder_testkit::{StaticRecipeSource, day, recipe, recipe_created, sample_config};

fn app_over(recipes: Vec<RecipeCandidate>) -> (Router, Arc<StaticRecipeSource>) {
	let source = Arc::new(StaticRecipeSource::new(recipes));
	let service = Arc::new(LarderService::with_source(sample_config(), source.clone()));

	(routes::router(AppState { service }), source)
}

fn egg_kitchen() -> Vec<RecipeCandidate> {
	let mut recipes = Vec::new();

	for idx in 0..6 {
		recipes.push(recipe(&format!("Egg Dish {idx}"), &["egg", "butter"], 4.0 + idx as f32 * 0.1));
	}

	recipes.push(recipe("Beef Stew", &["beef"], 4.9));

	recipes
}

fn search_request(uri: &str, query: &str) -> Request<Body> {
	let payload = serde_json::json!({ "query": query });

	Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

fn get_request(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
async fn health_ok() {
	let (app, _source) = app_over(Vec::new());
	let response = app.oneshot(get_request("/health")).await.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ingredient_search_returns_the_result_set() {
	let (app, _source) = app_over(egg_kitchen());
	let response = app
		.oneshot(search_request("/v1/search/ingredients", "egg"))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["count"], 6);
	assert_eq!(json["items"].as_array().expect("Items must be an array.").len(), 6);
	assert_eq!(json["items"][0]["title"], "Egg Dish 5");
	assert_eq!(json["items"][0]["isSuggested"], false);
	assert!(json["items"][0]["similarityScore"].is_number());
}

#[tokio::test]
async fn cached_set_round_trips_through_the_api() {
	let (app, source) = app_over(egg_kitchen());
	let miss = app
		.clone()
		.oneshot(get_request("/v1/search/ingredients/cached"))
		.await
		.expect("Failed to call cached.");

	assert_eq!(miss.status(), StatusCode::NOT_FOUND);
	assert_eq!(json_body(miss).await["error_code"], "not_found");

	let search = app
		.clone()
		.oneshot(search_request("/v1/search/ingredients", "egg"))
		.await
		.expect("Failed to call search.");

	assert_eq!(search.status(), StatusCode::OK);

	let calls_after_search = source.calls.total();
	let hit = app
		.oneshot(get_request("/v1/search/ingredients/cached"))
		.await
		.expect("Failed to call cached.");

	assert_eq!(hit.status(), StatusCode::OK);
	assert_eq!(json_body(hit).await["count"], 6);
	assert_eq!(source.calls.total(), calls_after_search);
}

#[tokio::test]
async fn unknown_cache_kind_is_a_bad_request() {
	let (app, _source) = app_over(Vec::new());
	let response = app
		.oneshot(get_request("/v1/search/desserts/cached"))
		.await
		.expect("Failed to call cached.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(json_body(response).await["error_code"], "invalid_request");
}

#[tokio::test]
async fn repository_failure_maps_to_bad_gateway() {
	let (app, source) = app_over(egg_kitchen());

	source.fail_by_ingredients_from(0);

	let response = app
		.oneshot(search_request("/v1/search/ingredients", "egg"))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
	assert_eq!(json_body(response).await["error_code"], "gateway_unavailable");
}

#[tokio::test]
async fn allergen_search_has_its_own_route() {
	let (app, _source) = app_over(egg_kitchen());
	let response = app
		.oneshot(search_request("/v1/search/allergens", "egg"))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::OK);

	// One recipe is egg-free; the rest fill in as suggestions.
	let json = json_body(response).await;

	assert_eq!(json["count"], 7);
	assert_eq!(json["items"][0]["title"], "Beef Stew");
	assert_eq!(json["items"][0]["isSuggested"], false);
	assert_eq!(json["items"][1]["isSuggested"], true);
}

#[tokio::test]
async fn newest_browsing_honors_the_limit_param() {
	let recipes = vec![
		recipe_created("Oldest", &["a"], 3.0, day(1)),
		recipe_created("Newest", &["b"], 2.0, day(9)),
		recipe_created("Middle", &["c"], 5.0, day(5)),
	];
	let (app, _source) = app_over(recipes);
	let response = app
		.oneshot(get_request("/v1/recipes/newest?limit=2"))
		.await
		.expect("Failed to call newest.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["count"], 2);
	assert_eq!(json["items"][0]["title"], "Newest");
	assert_eq!(json["items"][1]["title"], "Middle");
}

#[tokio::test]
async fn top_rated_browsing_orders_by_rating() {
	let recipes = vec![
		recipe("Low", &["a"], 2.0),
		recipe("High", &["b"], 4.9),
		recipe("Mid", &["c"], 3.5),
	];
	let (app, _source) = app_over(recipes);
	let response = app
		.oneshot(get_request("/v1/recipes/top-rated"))
		.await
		.expect("Failed to call top-rated.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;
	let titles: Vec<&str> = json["items"]
		.as_array()
		.expect("Items must be an array.")
		.iter()
		.map(|item| item["title"].as_str().expect("Title must be a string."))
		.collect();

	assert_eq!(titles, ["High", "Mid", "Low"]);
}
