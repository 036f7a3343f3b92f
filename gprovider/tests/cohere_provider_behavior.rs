#![cfg(feature = "service-cohere")]

use std::sync::{Arc, Mutex};

use gcommon::Turn;
use gprovider::adapters::cohere::{CohereChatCall, CohereProvider, CohereTransport};
use gprovider::{
    ChatProvider, ChatReply, ChatRequest, ProviderFuture, SecretString, ServiceError,
    ServiceErrorKind, ServiceId,
};

#[derive(Debug, Default)]
struct FakeTransport {
    captured_key: Mutex<Option<String>>,
    captured_call: Mutex<Option<CohereChatCall>>,
}

impl CohereTransport for FakeTransport {
    fn chat<'a>(
        &'a self,
        call: CohereChatCall,
        api_key: String,
    ) -> ProviderFuture<'a, Result<ChatReply, ServiceError>> {
        Box::pin(async move {
            *self.captured_call.lock().expect("call lock") = Some(call);
            *self.captured_key.lock().expect("key lock") = Some(api_key);

            Ok(ChatReply::new("try a gratin"))
        })
    }
}

#[tokio::test]
async fn reply_resolves_the_default_model_and_forwards_the_key() {
    let transport = Arc::new(FakeTransport::default());
    let provider = CohereProvider::new(SecretString::new("co-key-1"), transport.clone());

    let request = ChatRequest::new("what should I do with leftover potatoes?")
        .with_history(vec![Turn::user("hi"), Turn::assistant("hello!")])
        .with_preamble("You are a knowledgeable cooking assistant.")
        .with_temperature(0.7)
        .enable_web_search();

    let reply = provider.reply(request).await.expect("reply should succeed");
    assert_eq!(reply.text, "try a gratin");
    assert_eq!(provider.id(), ServiceId::Cohere);

    let call = transport
        .captured_call
        .lock()
        .expect("call lock")
        .clone()
        .expect("call should be captured");
    assert_eq!(call.model, "command-r");
    assert_eq!(call.history.len(), 2);
    assert_eq!(call.temperature, Some(0.7));
    assert!(call.web_search);

    let key = transport
        .captured_key
        .lock()
        .expect("key lock")
        .clone()
        .expect("key should be captured");
    assert_eq!(key, "co-key-1");
}

#[tokio::test]
async fn reply_honors_a_model_override() {
    let transport = Arc::new(FakeTransport::default());
    let provider = CohereProvider::new(SecretString::new("co-key-2"), transport.clone())
        .with_default_model("command-r-plus");

    provider
        .reply(ChatRequest::new("hi"))
        .await
        .expect("reply should succeed");

    let call = transport
        .captured_call
        .lock()
        .expect("call lock")
        .clone()
        .expect("call should be captured");
    assert_eq!(call.model, "command-r-plus");
}

#[tokio::test]
async fn blank_messages_are_rejected_before_the_transport_is_reached() {
    let transport = Arc::new(FakeTransport::default());
    let provider = CohereProvider::new(SecretString::new("co-key-3"), transport.clone());

    let error = provider
        .reply(ChatRequest::new("   "))
        .await
        .expect_err("blank message should fail");

    assert_eq!(error.kind, ServiceErrorKind::InvalidRequest);
    assert!(transport.captured_call.lock().expect("call lock").is_none());
}
