//! AWS DynamoDB book store.
//!
//! One item per book, partition key `isbn` (S):
//!
//! | attribute    | type | notes                               |
//! |--------------|------|-------------------------------------|
//! | `isbn`       | S    | hash key                            |
//! | `title`      | S    |                                     |
//! | `author`     | S    |                                     |
//! | `publisher`  | S    | removed when the book has none      |
//! | `created_at` | S    | first write, preserved on overwrite |
//! | `updated_at` | S    | every write                         |

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use tracing::debug;

use super::book_store::{format_timestamp, BookRecord, BookStore, BookStoreError, BookStoreResult};
use crate::config::TableConfig;
use crate::model::Book;

const ATTR_ISBN: &str = "isbn";
const ATTR_TITLE: &str = "title";
const ATTR_AUTHOR: &str = "author";
const ATTR_PUBLISHER: &str = "publisher";
const ATTR_CREATED_AT: &str = "created_at";
const ATTR_UPDATED_AT: &str = "updated_at";

/// Build the `UpdateItem` expression for an upsert.
///
/// Attribute names go through `#placeholders` so none of them can collide
/// with DynamoDB reserved words.
fn upsert_expression(has_publisher: bool) -> String {
    let mut expr = String::from(
        "SET #title = :title, #author = :author, \
         #created_at = if_not_exists(#created_at, :now), #updated_at = :now",
    );
    if has_publisher {
        expr.push_str(", #publisher = :publisher");
    } else {
        expr.push_str(" REMOVE #publisher");
    }
    expr
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

fn required_attr(item: &HashMap<String, AttributeValue>, name: &str) -> anyhow::Result<String> {
    string_attr(item, name)
        .ok_or_else(|| anyhow::anyhow!("item is missing string attribute '{name}'"))
}

/// Convert a DynamoDB item into a [`BookRecord`].
fn item_to_record(item: &HashMap<String, AttributeValue>) -> anyhow::Result<BookRecord> {
    Ok(BookRecord {
        book: Book {
            isbn: required_attr(item, ATTR_ISBN)?,
            title: required_attr(item, ATTR_TITLE)?,
            author: required_attr(item, ATTR_AUTHOR)?,
            // A NULL attribute and a missing one both mean "no publisher".
            publisher: string_attr(item, ATTR_PUBLISHER),
        },
        created_at: string_attr(item, ATTR_CREATED_AT).unwrap_or_default(),
        updated_at: string_attr(item, ATTR_UPDATED_AT).unwrap_or_default(),
    })
}

/// Map an AWS SDK error to an anyhow error with context.
fn map_sdk_error(context: &str, err: impl std::error::Error) -> anyhow::Error {
    anyhow::anyhow!("DynamoDB {context}: {}", DisplayErrorContext(err))
}

pub struct DynamoDbBookStore {
    client: Client,
    table_name: String,
}

impl DynamoDbBookStore {
    /// Create a store for the configured table using the default AWS
    /// credential chain.
    pub async fn new(config: &TableConfig) -> anyhow::Result<Self> {
        let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            builder = builder.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        let cfg = builder.load().await;
        Ok(Self::with_client(Client::new(&cfg), config.name.clone()))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl BookStore for DynamoDbBookStore {
    fn save(&self, book: Book) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>> {
        Box::pin(async move {
            let now = format_timestamp(Utc::now());
            debug!("DynamoDB update_item: table={} isbn={}", self.table_name, book.isbn);

            let mut request = self
                .client
                .update_item()
                .table_name(&self.table_name)
                .key(ATTR_ISBN, AttributeValue::S(book.isbn))
                .update_expression(upsert_expression(book.publisher.is_some()))
                .expression_attribute_names("#title", ATTR_TITLE)
                .expression_attribute_names("#author", ATTR_AUTHOR)
                .expression_attribute_names("#publisher", ATTR_PUBLISHER)
                .expression_attribute_names("#created_at", ATTR_CREATED_AT)
                .expression_attribute_names("#updated_at", ATTR_UPDATED_AT)
                .expression_attribute_values(":title", AttributeValue::S(book.title))
                .expression_attribute_values(":author", AttributeValue::S(book.author))
                .expression_attribute_values(":now", AttributeValue::S(now));

            if let Some(publisher) = book.publisher {
                request =
                    request.expression_attribute_values(":publisher", AttributeValue::S(publisher));
            }

            request
                .send()
                .await
                .map_err(|e| map_sdk_error("update_item", e))?;

            Ok(())
        })
    }

    fn get(
        &self,
        isbn: &str,
    ) -> Pin<Box<dyn Future<Output = BookStoreResult<BookRecord>> + Send + '_>> {
        let isbn = isbn.to_string();
        Box::pin(async move {
            debug!("DynamoDB get_item: table={} isbn={}", self.table_name, isbn);

            let result = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .key(ATTR_ISBN, AttributeValue::S(isbn.clone()))
                .consistent_read(true)
                .send()
                .await
                .map_err(|e| map_sdk_error("get_item", e))?;

            match result.item() {
                Some(item) => Ok(item_to_record(item)?),
                None => Err(BookStoreError::NotFound { isbn }),
            }
        })
    }

    fn delete(&self, isbn: &str) -> Pin<Box<dyn Future<Output = BookStoreResult<()>> + Send + '_>> {
        let isbn = isbn.to_string();
        Box::pin(async move {
            debug!("DynamoDB delete_item: table={} isbn={}", self.table_name, isbn);

            // The condition turns "no such row" into a distinguishable error
            // instead of DynamoDB's silent no-op delete.
            self.client
                .delete_item()
                .table_name(&self.table_name)
                .key(ATTR_ISBN, AttributeValue::S(isbn.clone()))
                .condition_expression("attribute_exists(#isbn)")
                .expression_attribute_names("#isbn", ATTR_ISBN)
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if service_err.is_conditional_check_failed_exception() {
                        BookStoreError::NotFound { isbn: isbn.clone() }
                    } else {
                        BookStoreError::Backend(map_sdk_error("delete_item", service_err))
                    }
                })?;

            Ok(())
        })
    }
}
