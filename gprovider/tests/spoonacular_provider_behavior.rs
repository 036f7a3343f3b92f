#![cfg(feature = "service-spoonacular")]

use std::sync::{Arc, Mutex};

use gprovider::adapters::spoonacular::{SpoonacularProvider, SpoonacularTransport};
use gprovider::{
    ProviderFuture, RecipeInformation, RecipeProvider, RecipeSearchRequest, RecipeSummary,
    SecretString, ServiceError, ServiceErrorKind, ServiceId,
};

#[derive(Debug, Default)]
struct FakeTransport {
    captured_search: Mutex<Option<RecipeSearchRequest>>,
    information_ids: Mutex<Vec<u64>>,
}

impl SpoonacularTransport for FakeTransport {
    fn search_by_ingredients<'a>(
        &'a self,
        request: RecipeSearchRequest,
        _api_key: String,
    ) -> ProviderFuture<'a, Result<Vec<RecipeSummary>, ServiceError>> {
        Box::pin(async move {
            *self.captured_search.lock().expect("search lock") = Some(request);

            Ok(vec![RecipeSummary {
                id: 101,
                title: "Shakshuka".to_string(),
                image: None,
                used_ingredients: vec!["egg".to_string(), "tomato".to_string()],
                missed_ingredients: vec!["cumin".to_string()],
            }])
        })
    }

    fn recipe_information<'a>(
        &'a self,
        recipe_id: u64,
        _api_key: String,
    ) -> ProviderFuture<'a, Result<RecipeInformation, ServiceError>> {
        Box::pin(async move {
            self.information_ids
                .lock()
                .expect("information lock")
                .push(recipe_id);

            Ok(RecipeInformation {
                instructions: "Simmer the tomatoes, crack in the eggs.".to_string(),
                source_url: "https://recipes.example/shakshuka".to_string(),
                ready_in_minutes: 35,
                servings: 4,
            })
        })
    }
}

#[tokio::test]
async fn search_forwards_the_capped_pantry_ignoring_request() {
    let transport = Arc::new(FakeTransport::default());
    let provider = SpoonacularProvider::new(SecretString::new("sp-key-1"), transport.clone());

    let summaries = provider
        .search_by_ingredients(RecipeSearchRequest::new(vec![
            "egg".to_string(),
            "tomato".to_string(),
        ]))
        .await
        .expect("search should succeed");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Shakshuka");
    assert_eq!(provider.id(), ServiceId::Spoonacular);

    let request = transport
        .captured_search
        .lock()
        .expect("search lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(request.ingredients, vec!["egg", "tomato"]);
    assert_eq!(request.max_results, 5);
    assert_eq!(request.ranking, 2);
    assert!(request.ignore_pantry);
}

#[tokio::test]
async fn information_is_fetched_by_recipe_id() {
    let transport = Arc::new(FakeTransport::default());
    let provider = SpoonacularProvider::new(SecretString::new("sp-key-2"), transport.clone());

    let information = provider
        .recipe_information(101)
        .await
        .expect("information should succeed");
    assert_eq!(information.servings, 4);
    assert_eq!(
        *transport.information_ids.lock().expect("information lock"),
        vec![101]
    );
}

#[tokio::test]
async fn empty_ingredient_lists_are_rejected_before_the_transport_is_reached() {
    let transport = Arc::new(FakeTransport::default());
    let provider = SpoonacularProvider::new(SecretString::new("sp-key-3"), transport.clone());

    let error = provider
        .search_by_ingredients(RecipeSearchRequest::new(Vec::new()))
        .await
        .expect_err("empty ingredient list should fail");

    assert_eq!(error.kind, ServiceErrorKind::InvalidRequest);
    assert!(transport.captured_search.lock().expect("search lock").is_none());
}
