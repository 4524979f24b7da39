use crate::e2e::helpers;

use helpers::{TaskPlan, TestContext, OUTPUT_BUCKET};
use pretty_assertions::assert_eq;
use scripttape::domain::pipeline::{PipelineError, PipelineServiceApi};
use scripttape::domain::script::{ScriptError, Voice};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn it_should_publish_one_episode_in_script_order() {
    // Tasks complete out of submission order: 0 needs three polls,
    // 1 needs one, 2 needs two.
    let ctx = TestContext::with_plans(vec![
        TaskPlan::Completes { polls: 3 },
        TaskPlan::Completes { polls: 1 },
        TaskPlan::Completes { polls: 2 },
    ]);
    ctx.put_script(
        "show-42.txt",
        "@Salli Hello there @Joanna Goodbye now @Matthew See you soon",
    );

    let artifact = ctx.service.run(Some("show-42.txt")).await.unwrap();

    assert_eq!(artifact.bucket, OUTPUT_BUCKET);
    assert_eq!(
        artifact.key,
        format!("episodes/{}/episode.mp3", artifact.run_id)
    );

    // Concatenated output follows script order, not completion order
    let episode = ctx.storage.object(OUTPUT_BUCKET, &artifact.key).unwrap();
    assert_eq!(
        String::from_utf8(episode).unwrap(),
        "seg:Hello there;seg:Goodbye now;seg:See you soon;"
    );

    // Submissions happened sequentially in script order
    let submissions = ctx.synthesis.submissions();
    let voices: Vec<Voice> = submissions.iter().map(|s| s.voice).collect();
    assert_eq!(voices, vec![Voice::Salli, Voice::Joanna, Voice::Matthew]);
    for submission in &submissions {
        assert_eq!(
            submission.key_prefix,
            format!("synthesis/{}/", artifact.run_id)
        );
    }

    // All working storage is gone
    assert!(ctx.local_run_dirs().is_empty());
    assert!(ctx.intermediate_keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_fail_before_submitting_on_unknown_voice() {
    let ctx = TestContext::new();
    ctx.put_script("bad.txt", "@Unknown hello @Salli hi");

    let err = ctx.service.run(Some("bad.txt")).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Script(ScriptError::UnknownVoice { .. })
    ));
    assert_eq!(ctx.synthesis.submission_count(), 0);
    assert!(ctx.local_run_dirs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_reject_a_missing_input_key() {
    let ctx = TestContext::new();

    let err = ctx.service.run(None).await.unwrap_err();
    assert!(matches!(err, PipelineError::MissingInput));

    let err = ctx.service.run(Some("   ")).await.unwrap_err();
    assert!(matches!(err, PipelineError::MissingInput));

    // Rejected before any external call
    assert_eq!(ctx.storage.get_call_count(), 0);
    assert_eq!(ctx.synthesis.submission_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn it_should_surface_failed_synthesis_tasks() {
    let ctx = TestContext::with_plans(vec![
        TaskPlan::Completes { polls: 1 },
        TaskPlan::Fails { polls: 1 },
    ]);
    ctx.put_script("show.txt", "@Salli intro @Joanna outro");

    let err = ctx.service.run(Some("show.txt")).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::SynthesisFailed { index: 1, .. }
    ));

    // The completed sibling's intermediate output was still cleaned up
    assert!(ctx.intermediate_keys().is_empty());
    assert!(ctx.local_run_dirs().is_empty());
    assert!(ctx.storage.keys(OUTPUT_BUCKET).is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_time_out_when_tasks_never_settle() {
    let ctx = TestContext::with_deadline(
        vec![TaskPlan::NeverSettles],
        Duration::from_secs(30),
    );
    ctx.put_script("show.txt", "@Salli forever in progress");

    let err = ctx.service.run(Some("show.txt")).await.unwrap_err();

    assert!(matches!(err, PipelineError::Timeout(_)));
    assert!(ctx.storage.keys(OUTPUT_BUCKET).is_empty());
    assert!(ctx.local_run_dirs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_abort_when_a_submission_is_rejected() {
    let ctx = TestContext::with_plans(vec![
        TaskPlan::Completes { polls: 1 },
        TaskPlan::RejectsSubmission,
    ]);
    ctx.put_script("show.txt", "@Salli first @Joanna second @Matthew third");

    let err = ctx.service.run(Some("show.txt")).await.unwrap_err();

    assert!(matches!(err, PipelineError::Submission(_)));
    // The run aborted mid-dispatch: the third utterance was never submitted
    assert_eq!(ctx.synthesis.submission_count(), 2);
    assert!(ctx.storage.keys(OUTPUT_BUCKET).is_empty());
    assert!(ctx.local_run_dirs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_clean_up_when_publishing_fails() {
    let ctx = TestContext::new();
    ctx.put_script("show.txt", "@Salli nearly there @Joanna so close");
    ctx.storage.fail_puts();

    let err = ctx.service.run(Some("show.txt")).await.unwrap_err();

    assert!(matches!(err, PipelineError::Storage(_)));
    // Working storage is gone even though the publish step failed
    assert!(ctx.local_run_dirs().is_empty());
    assert!(ctx.intermediate_keys().is_empty());
    assert!(ctx.storage.keys(OUTPUT_BUCKET).is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_should_namespace_each_run_separately() {
    let ctx = TestContext::new();
    ctx.put_script("show.txt", "@Salli same script twice");

    let first = ctx.service.run(Some("show.txt")).await.unwrap();
    let second = ctx.service.run(Some("show.txt")).await.unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert_ne!(first.key, second.key);

    // Both artifacts were published and neither run disturbed the other
    assert!(ctx.storage.object(OUTPUT_BUCKET, &first.key).is_some());
    assert!(ctx.storage.object(OUTPUT_BUCKET, &second.key).is_some());
    assert!(ctx.intermediate_keys().is_empty());
    assert!(ctx.local_run_dirs().is_empty());
}
