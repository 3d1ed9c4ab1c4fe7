pub mod bitbucket;
pub mod github;

pub use bitbucket::BitbucketClient;
pub use github::GithubClient;
