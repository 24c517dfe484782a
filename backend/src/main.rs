use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use backend::{
    attachment_storage::AttachmentStorage, server, todo_service::TodoService, types::Environment,
};
use todo_storage::{comment::CommentStorage, todo::TodoStorage};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // JSON logs for staging/production (CloudWatch), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let dynamodb_client = Arc::new(DynamoDbClient::from_conf(
        environment.dynamodb_client_config().await,
    ));
    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));

    let todo_store = Arc::new(TodoStorage::new(
        dynamodb_client.clone(),
        environment.todos_table(),
        environment.todos_index(),
    ));
    let comment_store = Arc::new(CommentStorage::new(
        dynamodb_client,
        environment.comments_table(),
        environment.comments_index(),
    ));
    let attachment_storage = Arc::new(AttachmentStorage::new(
        s3_client,
        environment.images_bucket(),
        environment.signed_url_expiration_secs(),
    ));

    let todo_service = Arc::new(TodoService::new(
        todo_store,
        comment_store,
        attachment_storage,
    ));

    server::start(environment, todo_service).await
}
