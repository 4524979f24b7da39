pub mod polly_synthesis_repository;
pub mod s3_storage_repository;
pub mod storage_repository;
pub mod synthesis_repository;

pub use polly_synthesis_repository::PollySynthesisRepository;
pub use s3_storage_repository::S3StorageRepository;
pub use storage_repository::StorageRepository;
pub use synthesis_repository::{
    SubmittedTask, SynthesisDestination, SynthesisRepository, TaskSnapshot,
};
