use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cyber_llms::{CompletionRequest, Error, ModelClient, ModelName, Role};

use crate::error::PolicyError;
use crate::{
    Action, EnvironmentState, Learner, LlmLearner, Observation, Outcome, Phase, PolicyConfig,
    StepOutcome, SYSTEM_PROMPT,
};

/// Mock client that replays scripted replies and records every request
struct ScriptedClient {
    replies: Mutex<VecDeque<cyber_llms::Result<Vec<String>>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(replies: Vec<cyber_llms::Result<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn replying(candidates: &[&str]) -> Arc<Self> {
        Self::new(vec![Ok(candidates.iter().map(|c| c.to_string()).collect())])
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    fn model(&self) -> ModelName {
        ModelName::Gpt4
    }

    async fn complete(&self, request: CompletionRequest) -> cyber_llms::Result<Vec<String>> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::ServiceError {
                status: 500,
                message: "script exhausted".to_string(),
            }))
    }
}

struct Network(&'static str);

impl EnvironmentState for Network {
    fn describe(&self) -> String {
        self.0.to_string()
    }
}

const STATE: Network = Network("node 1 owned; node 2 discovered");

fn learner(client: Arc<ScriptedClient>, config: PolicyConfig) -> LlmLearner {
    LlmLearner::new(client, config)
}

#[tokio::test]
async fn test_exploit_skips_garbage_and_takes_first_valid() {
    let client = ScriptedClient::replying(&[
        "I think we should attack node 2",
        "run_remote_attack(1, 2, SMB)",
        "run_attack(1, CVE-1)",
    ]);
    let mut learner = learner(client.clone(), PolicyConfig::default());

    let decision = learner
        .exploit(&STATE, &Observation::from("port 445 open"))
        .await
        .unwrap();

    assert_eq!(decision.label, "exploit");
    assert_eq!(
        decision.action,
        Some(Action::remote_attack("1", "2", "SMB").unwrap())
    );
    assert_eq!(decision.metadata.phase, Phase::Exploit);
    assert_eq!(decision.metadata.model, ModelName::Gpt4);
    assert_eq!(decision.metadata.candidates, 3);
    assert_eq!(decision.metadata.chosen_index, Some(1));
    assert_eq!(decision.metadata.outcome, Outcome::Chosen);
    assert_eq!(decision.metadata.rejections.len(), 1);
    assert_eq!(decision.metadata.rejections[0].index, 0);
}

#[tokio::test]
async fn test_exploit_with_no_parseable_candidate_returns_none() {
    let client = ScriptedClient::replying(&["hack(1)", "run_attack(1)", "nothing to do"]);
    let mut learner = learner(client, PolicyConfig::default());

    let decision = learner
        .exploit(&STATE, &Observation::from("quiet"))
        .await
        .unwrap();

    assert_eq!(decision.action, None);
    assert_eq!(decision.metadata.outcome, Outcome::NoValidAction);
    assert_eq!(decision.metadata.chosen_index, None);
    assert_eq!(decision.metadata.rejections.len(), 3);
}

#[tokio::test]
async fn test_exploit_propagates_service_failure() {
    let client = ScriptedClient::new(vec![Err(Error::RateLimited {
        retry_after: None,
        message: "slow down".to_string(),
    })]);
    let mut learner = learner(client, PolicyConfig::default());

    let err = learner
        .exploit(&STATE, &Observation::from("quiet"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PolicyError::Client(Error::RateLimited { .. })
    ));
}

#[tokio::test]
async fn test_exploit_sends_one_request_with_system_then_user() {
    let client = ScriptedClient::replying(&["run_attack(1, 2)"]);
    let mut learner = learner(
        client.clone(),
        PolicyConfig::default()
            .with_exploit_temperature(0.2)
            .with_exploit_candidates(3),
    );

    learner
        .exploit(&STATE, &Observation::from("port 22 open"))
        .await
        .unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role(), Role::System);
    assert_eq!(messages[0].content(), SYSTEM_PROMPT.as_str());
    assert_eq!(messages[1].role(), Role::User);
    assert!(messages[1].content().contains("node 1 owned"));
    assert!(messages[1].content().contains("port 22 open"));
    assert_eq!(requests[0].options.temperature, Some(0.2));
    assert_eq!(requests[0].options.candidates, Some(3));
}

#[tokio::test]
async fn test_repeated_steps_query_again() {
    let client = ScriptedClient::new(vec![
        Ok(vec!["run_attack(1, 2)".to_string()]),
        Ok(vec!["run_attack(1, 2)".to_string()]),
    ]);
    let mut learner = learner(client.clone(), PolicyConfig::default());
    let observation = Observation::from("same");

    learner.exploit(&STATE, &observation).await.unwrap();
    learner.exploit(&STATE, &observation).await.unwrap();

    assert_eq!(client.requests().len(), 2);
}

#[tokio::test]
async fn test_empty_state_is_a_client_error() {
    let client = ScriptedClient::replying(&["run_attack(1, 2)"]);
    let mut learner = learner(client.clone(), PolicyConfig::default());

    let err = learner.explore(&Network("   ")).await.unwrap_err();

    assert!(matches!(err, PolicyError::Client(Error::InvalidMessage(_))));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_explore_picks_among_valid_candidates() {
    let replies = [
        "run_attack(1, a)",
        "garbage",
        "run_attack(1, b)",
        "run_attack(1, c)",
    ];
    let mut seen = HashSet::new();
    for seed in 0..32 {
        let client = ScriptedClient::replying(&replies);
        let mut learner = learner(
            client.clone(),
            PolicyConfig::default()
                .with_seed(seed)
                .with_explore_candidates(4)
                .with_explore_temperature(1.3),
        );

        let decision = learner.explore(&STATE).await.unwrap();

        assert_eq!(decision.label, "explore");
        assert_eq!(decision.metadata.phase, Phase::Explore);
        assert_eq!(decision.metadata.rejections.len(), 1);
        let index = decision.metadata.chosen_index.unwrap();
        assert_ne!(index, 1);
        seen.insert(index);

        let request = &client.requests()[0];
        assert_eq!(request.options.temperature, Some(1.3));
        assert_eq!(request.options.candidates, Some(4));
    }
    assert!(seen.len() > 1);
}

#[tokio::test]
async fn test_explore_is_reproducible_with_seed() {
    let replies = ["run_attack(1, a)", "run_attack(1, b)", "run_attack(1, c)"];
    let mut picks = Vec::new();
    for _ in 0..2 {
        let client = ScriptedClient::replying(&replies);
        let mut learner = learner(client, PolicyConfig::default().with_seed(11));
        let decision = learner.explore(&STATE).await.unwrap();
        picks.push(decision.action);
    }
    assert_eq!(picks[0], picks[1]);
}

#[tokio::test]
async fn test_explore_without_valid_candidate_fails() {
    let client = ScriptedClient::replying(&["no", "still no"]);
    let mut learner = learner(client, PolicyConfig::default());

    let err = learner.explore(&STATE).await.unwrap_err();

    assert!(matches!(err, PolicyError::NoValidAction { candidates: 2 }));
}

#[tokio::test]
async fn test_on_step_and_lifecycle_hooks_are_no_ops() {
    let client = ScriptedClient::replying(&["run_attack(1, 2)"]);
    let mut learner = learner(client.clone(), PolicyConfig::default());

    learner.new_episode(0, 0);
    let decision = learner
        .exploit(&STATE, &Observation::from("x"))
        .await
        .unwrap();
    let outcome = StepOutcome {
        observation: Observation::from("node 2 owned"),
        reward: 10.0,
        done: true,
        info: serde_json::json!({ "newly_discovered": 1 }),
    };
    learner.on_step(&STATE, &outcome, &decision.metadata);
    learner.end_of_iteration(1, true);
    learner.end_of_episode(0, 1);

    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn test_decision_ids_are_unique() {
    let client = ScriptedClient::new(vec![
        Ok(vec!["run_attack(1, 2)".to_string()]),
        Ok(vec!["run_attack(1, 2)".to_string()]),
    ]);
    let mut learner = learner(client, PolicyConfig::default());
    let observation = Observation::from("x");

    let a = learner.exploit(&STATE, &observation).await.unwrap();
    let b = learner.exploit(&STATE, &observation).await.unwrap();

    assert_ne!(a.metadata.decision_id, b.metadata.decision_id);
}

#[test]
fn test_parameters_as_string() {
    let client = ScriptedClient::new(Vec::new());
    let learner = learner(client, PolicyConfig::default());
    assert_eq!(
        learner.parameters_as_string(),
        "model=gpt-4 exploit_temperature=default exploit_candidates=1 explore_temperature=1 explore_candidates=5"
    );
}
