// Not every helper is used by every test file
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use tokio::time::sleep;
use uuid::Uuid;

/// Test configuration for LocalStack
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
pub const TEST_REGION: &str = "us-east-1";

/// Builds a `DynamoDB` client pointed at LocalStack
pub async fn localstack_client() -> Arc<DynamoDbClient> {
    let credentials = Credentials::from_keys(
        "test", // AWS_ACCESS_KEY_ID
        "test", // AWS_SECRET_ACCESS_KEY
        None,   // no session token
    );
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    Arc::new(DynamoDbClient::new(&config))
}

fn key(attribute: &str, key_type: KeyType) -> KeySchemaElement {
    KeySchemaElement::builder()
        .attribute_name(attribute)
        .key_type(key_type)
        .build()
        .expect("Failed to build key schema")
}

fn string_attribute(attribute: &str) -> AttributeDefinition {
    AttributeDefinition::builder()
        .attribute_name(attribute)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .expect("Failed to build attribute definition")
}

/// A table with a composite primary key and a single GSI, dropped with the value
pub struct TestTable {
    pub client: Arc<DynamoDbClient>,
    pub table_name: String,
    pub index_name: String,
}

impl TestTable {
    /// Creates a uniquely named table keyed by (`partition_key`, `sort_key`) with
    /// a GSI whose partition key is `sort_key`
    pub async fn create(prefix: &str, partition_key: &str, sort_key: &str) -> Self {
        let client = localstack_client().await;
        let table_name = format!("{prefix}-{}", Uuid::new_v4());
        let index_name = format!("{sort_key}-index");

        client
            .create_table()
            .table_name(&table_name)
            .billing_mode(BillingMode::PayPerRequest)
            .key_schema(key(partition_key, KeyType::Hash))
            .key_schema(key(sort_key, KeyType::Range))
            .attribute_definitions(string_attribute(partition_key))
            .attribute_definitions(string_attribute(sort_key))
            .global_secondary_indexes(
                GlobalSecondaryIndex::builder()
                    .index_name(&index_name)
                    .key_schema(key(sort_key, KeyType::Hash))
                    .projection(
                        Projection::builder()
                            .projection_type(ProjectionType::All)
                            .build(),
                    )
                    .build()
                    .expect("Failed to build GSI"),
            )
            .send()
            .await
            .expect("Failed to create test table");

        // Wait for table to be ready
        sleep(Duration::from_millis(100)).await;

        Self {
            client,
            table_name,
            index_name,
        }
    }
}

impl Drop for TestTable {
    fn drop(&mut self) {
        let client = self.client.clone();
        let table = self.table_name.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = client.delete_table().table_name(&table).send().await;
            });
        }
    }
}
