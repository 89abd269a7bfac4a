//! End-to-end scenarios for the respond pipeline.

use banter::prelude::*;

fn definition(tag: &str, patterns: &[&str], responses: &[&str]) -> IntentDefinition {
    IntentDefinition {
        tag: tag.to_string(),
        patterns: patterns.iter().map(|s| s.to_string()).collect(),
        responses: responses.iter().map(|s| s.to_string()).collect(),
    }
}

fn assistant_corpus() -> Corpus {
    Corpus::from_definitions(vec![
        definition(
            "greeting",
            &["hello", "hi there", "good morning"],
            &["Hello!", "Hi, nice to see you!"],
        ),
        definition(
            "farewell",
            &["goodbye", "see you later", "bye bye"],
            &["Goodbye!", "Take care!"],
        ),
        definition(
            "thanks",
            &["thank you", "thanks a lot", "much appreciated"],
            &["You're welcome!", "Any time!"],
        ),
    ])
    .unwrap()
}

fn seeded_engine(corpus: Corpus) -> ChatEngine {
    ChatEngine::train_with_config(
        corpus,
        EngineConfig {
            response_seed: Some(42),
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn end_to_end_greeting_example() -> Result<()> {
    // The corpus from the canonical walkthrough: one intent, one response.
    let corpus = Corpus::from_definitions(vec![definition(
        "greeting",
        &["hello", "hi there"],
        &["Hi! 😊"],
    )])?;
    let engine = ChatEngine::train(corpus)?;

    // "Hello!!" normalizes to "hello", matches exactly, classifies as
    // greeting, and the only response comes back verbatim.
    assert_eq!(engine.respond("Hello!!"), "Hi! 😊");
    Ok(())
}

#[test]
fn every_intent_is_reachable_through_its_own_phrases() {
    let corpus = assistant_corpus();
    let engine = seeded_engine(corpus.clone());

    for intent in corpus.intents() {
        for example in &intent.examples {
            let reply = engine.respond(example);
            assert!(
                intent.responses.contains(&reply),
                "phrase {example:?} of intent {} got reply {reply:?}",
                intent.tag
            );
        }
    }
}

#[test]
fn case_and_punctuation_resolve_to_the_same_intent() {
    let engine = seeded_engine(assistant_corpus());

    for input in ["HELLO", "hello", "hello!", "  Hello??  "] {
        let reply = engine.respond(input);
        assert!(
            ["Hello!", "Hi, nice to see you!"].contains(&reply.as_str()),
            "input {input:?} got reply {reply:?}"
        );
    }
}

#[test]
fn misspelled_input_still_reaches_the_intent() {
    let engine = seeded_engine(assistant_corpus());

    // One character off from "goodbye"
    let reply = engine.respond("godbye");
    assert!(
        ["Goodbye!", "Take care!"].contains(&reply.as_str()),
        "got reply {reply:?}"
    );
}

#[test]
fn unrelated_input_gets_the_no_match_fallback() {
    let engine = seeded_engine(assistant_corpus());

    assert_eq!(engine.respond("83924610573829146"), NO_MATCH_FALLBACK);
    assert_eq!(engine.respond(""), NO_MATCH_FALLBACK);
    assert_eq!(engine.respond("!!!"), NO_MATCH_FALLBACK);
}

#[test]
fn identically_seeded_engines_reply_identically() {
    let first = seeded_engine(assistant_corpus());
    let second = seeded_engine(assistant_corpus());

    for input in ["hello", "thank you", "see you later", "hi there"] {
        assert_eq!(first.respond(input), second.respond(input));
    }
}

#[test]
fn replies_always_come_from_the_predicted_intents_response_set() {
    let corpus = assistant_corpus();
    let engine = seeded_engine(corpus.clone());
    let thanks: Vec<String> = corpus.intent("thanks").unwrap().responses.clone();

    // Repeated calls may pick different responses but never leave the set
    for _ in 0..20 {
        let reply = engine.respond("thanks a lot");
        assert!(thanks.contains(&reply), "got reply {reply:?}");
    }
}

#[test]
fn engine_can_be_shared_across_threads() {
    let engine = std::sync::Arc::new(seeded_engine(assistant_corpus()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    let reply = engine.respond("hello");
                    assert!(["Hello!", "Hi, nice to see you!"].contains(&reply.as_str()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
