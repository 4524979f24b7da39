// End-to-end tests for the ScriptTape pipeline.
//
// The pipeline service is exercised against in-memory doubles of the
// synthesis provider and the object store, injected through the same
// repository traits the production wiring uses. Tests run under paused
// tokio time, so the pacing and polling sleeps cost nothing.

mod helpers;
mod test_pipeline;
