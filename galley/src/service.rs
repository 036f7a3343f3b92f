//! Assistant orchestration over the chat, vision, and recipe services.

use std::sync::Arc;

use futures_util::future::try_join_all;
use gcommon::Turn;
use gprovider::adapters::clarifai::{ClarifaiHttpTransport, ClarifaiProvider};
use gprovider::adapters::cohere::{CohereHttpTransport, CohereProvider};
use gprovider::adapters::spoonacular::{SpoonacularHttpTransport, SpoonacularProvider};
use gprovider::{
    ChatProvider, ChatRequest, ConceptRequest, NoopOperationHooks, RecipeProvider,
    RecipeSearchRequest, SecretString, ServiceOperationHooks, VisionProvider, observe_call,
};

use crate::{
    AssistantConfig, AssistantError, ConversationStore, InMemoryConversationStore,
    IngredientDetection, Recipe,
};

const COOKING_PREAMBLE: &str = "You are a knowledgeable cooking assistant. Answer questions \
    about recipes, ingredients, techniques, and meal planning, and keep the advice practical.";
const CHAT_TEMPERATURE: f32 = 0.7;
const CONFIDENCE_THRESHOLD: f32 = 0.75;

/// A cooking assistant composing a chat service, an ingredient
/// recognition service, and a recipe search service, with an in-memory
/// record of the running dialogue.
pub struct Assistant {
    chat: Arc<dyn ChatProvider>,
    vision: Arc<dyn VisionProvider>,
    recipes: Arc<dyn RecipeProvider>,
    store: Arc<dyn ConversationStore>,
    hooks: Arc<dyn ServiceOperationHooks>,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant").finish_non_exhaustive()
    }
}

impl Assistant {
    /// Builds an assistant over the real HTTP services, sharing one
    /// client across the three transports.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        config.validate()?;

        let client = reqwest::Client::new();
        let chat = CohereProvider::new(
            SecretString::new(config.chat_api_key),
            Arc::new(CohereHttpTransport::new(client.clone())),
        );

        let mut vision = ClarifaiProvider::new(
            SecretString::new(config.vision_api_key),
            Arc::new(ClarifaiHttpTransport::new(client.clone())),
        );
        if let Some(user_id) = config.vision_user_id {
            vision = vision.with_user_id(user_id);
        }
        if let Some(app_id) = config.vision_app_id {
            vision = vision.with_app_id(app_id);
        }

        let recipes = SpoonacularProvider::new(
            SecretString::new(config.recipe_api_key),
            Arc::new(SpoonacularHttpTransport::new(client)),
        );

        Ok(Self::builder(Arc::new(chat), Arc::new(vision), Arc::new(recipes)).build())
    }

    pub fn builder(
        chat: Arc<dyn ChatProvider>,
        vision: Arc<dyn VisionProvider>,
        recipes: Arc<dyn RecipeProvider>,
    ) -> AssistantBuilder {
        AssistantBuilder {
            chat,
            vision,
            recipes,
            store: None,
            hooks: None,
        }
    }

    /// Sends the question with the whole running dialogue and appends
    /// the new exchange on success. A failed call leaves the history
    /// untouched.
    ///
    /// Two overlapping calls on one instance may interleave their
    /// appended pairs; the store serializes each append, not whole
    /// exchanges.
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        if question.trim().is_empty() {
            return Err(AssistantError::invalid_input("Please provide a question"));
        }

        let history = self.store.load_turns().await;
        let request = ChatRequest::new(question)
            .with_history(history)
            .with_preamble(COOKING_PREAMBLE)
            .with_temperature(CHAT_TEMPERATURE)
            .enable_web_search();

        let reply = observe_call(
            self.chat.id(),
            "reply",
            self.hooks.as_ref(),
            self.chat.reply(request),
        )
        .await
        .map_err(|error| AssistantError::assistant_call_failed(error.message))?;

        self.store
            .append_turns(vec![
                Turn::user(question),
                Turn::assistant(reply.text.clone()),
            ])
            .await;

        Ok(reply.text)
    }

    pub async fn history(&self) -> Vec<Turn> {
        self.store.load_turns().await
    }

    pub async fn clear_history(&self) {
        self.store.clear().await;
    }

    /// Recognizes ingredients in a base64 (or data-URI) encoded image.
    /// Names scoring strictly above the confidence threshold become
    /// `ingredients`; the full concept list is returned alongside.
    pub async fn detect_ingredients(
        &self,
        image: &str,
    ) -> Result<IngredientDetection, AssistantError> {
        if image.trim().is_empty() {
            return Err(AssistantError::invalid_input("Please provide an image"));
        }

        let concepts = observe_call(
            self.vision.id(),
            "detect_concepts",
            self.hooks.as_ref(),
            self.vision.detect_concepts(ConceptRequest::new(image)),
        )
        .await
        .map_err(|error| AssistantError::ingredient_detection_failed(error.message))?;

        let ingredients = concepts
            .iter()
            .filter(|concept| concept.score > CONFIDENCE_THRESHOLD)
            .map(|concept| concept.name.clone())
            .collect();

        Ok(IngredientDetection {
            ingredients,
            concepts,
        })
    }

    /// Searches recipes by ingredients, then fetches every detail
    /// record concurrently and merges each into its summary. The result
    /// keeps the search order; one failing detail call fails the whole
    /// batch.
    pub async fn find_recipes(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Recipe>, AssistantError> {
        if ingredients.is_empty() {
            return Err(AssistantError::invalid_input("Please provide ingredients"));
        }

        let summaries = observe_call(
            self.recipes.id(),
            "search_by_ingredients",
            self.hooks.as_ref(),
            self.recipes
                .search_by_ingredients(RecipeSearchRequest::new(ingredients.to_vec())),
        )
        .await
        .map_err(|error| AssistantError::recipe_search_failed(error.message))?;

        let detail_calls = summaries.iter().map(|summary| {
            observe_call(
                self.recipes.id(),
                "recipe_information",
                self.hooks.as_ref(),
                self.recipes.recipe_information(summary.id),
            )
        });

        let details = try_join_all(detail_calls)
            .await
            .map_err(|error| AssistantError::recipe_search_failed(error.message))?;

        Ok(summaries
            .into_iter()
            .zip(details)
            .map(|(summary, information)| Recipe::from_parts(summary, information))
            .collect())
    }
}

pub struct AssistantBuilder {
    chat: Arc<dyn ChatProvider>,
    vision: Arc<dyn VisionProvider>,
    recipes: Arc<dyn RecipeProvider>,
    store: Option<Arc<dyn ConversationStore>>,
    hooks: Option<Arc<dyn ServiceOperationHooks>>,
}

impl AssistantBuilder {
    pub fn with_store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ServiceOperationHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn build(self) -> Assistant {
        Assistant {
            chat: self.chat,
            vision: self.vision,
            recipes: self.recipes,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryConversationStore::new())),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(NoopOperationHooks)),
        }
    }
}
