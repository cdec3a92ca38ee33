//! ERP gateway port interface
//!
//! The bridge talks to the ERP exclusively through [`ErpGateway`]. Only
//! `authenticate` and `execute_kw` are required; lookups and writes are
//! provided on top of `execute_kw` so every implementation (the Odoo
//! JSON-RPC client, the in-memory fake) speaks the same object protocol.

use async_trait::async_trait;
use mesbridge_domain::{BridgeError, RecordId, Result, UserId};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use serde_json::{json, Map, Value};

/// Field values sent to `create`/`write`, and keyword arguments of a call.
pub type Values = Map<String, Value>;

/// One `[field, operator, value]` term of an ERP search domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl Criterion {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { field: field.into(), operator: operator.into(), value: value.into() }
    }

    /// Equality term, the only kind the bridge needs.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, "=", value)
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut term = serializer.serialize_tuple(3)?;
        term.serialize_element(&self.field)?;
        term.serialize_element(&self.operator)?;
        term.serialize_element(&self.value)?;
        term.end()
    }
}

/// A row returned by `search_read`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Values);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record's integer `id`.
    pub fn id(&self) -> Result<RecordId> {
        self.0.get("id").and_then(Value::as_i64).ok_or_else(|| {
            BridgeError::Integration("ERP record is missing an integer `id`".to_string())
        })
    }

    /// Id behind a many2one field.
    ///
    /// `search_read` renders many2one values as `[id, display_name]` and
    /// empty ones as `false`; a bare integer is accepted as well.
    pub fn many2one_id(&self, field: &str) -> Option<RecordId> {
        match self.0.get(field)? {
            Value::Array(pair) => pair.first().and_then(Value::as_i64),
            Value::Number(id) => id.as_i64(),
            _ => None,
        }
    }

    pub fn into_values(self) -> Values {
        self.0
    }
}

impl From<Values> for Record {
    fn from(values: Values) -> Self {
        Self(values)
    }
}

/// Value for a relational field: the id, or `false` when unset.
pub fn reference(id: Option<RecordId>) -> Value {
    id.map_or(Value::Bool(false), Value::from)
}

/// Trait for ERP object-protocol operations
#[async_trait]
pub trait ErpGateway: Send + Sync {
    /// Authenticate the configured integration user and return its id.
    async fn authenticate(&self) -> Result<UserId>;

    /// Invoke `method` on `model` with positional and keyword arguments.
    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Values,
    ) -> Result<Value>;

    /// Return at most one record matching `domain`, or `None` when nothing
    /// matches.
    async fn find_one(
        &self,
        model: &str,
        domain: &[Criterion],
        fields: &[&str],
    ) -> Result<Option<Record>> {
        let mut kwargs = Values::new();
        kwargs.insert("fields".to_string(), json!(fields));
        kwargs.insert("limit".to_string(), json!(1));

        let rows = self.execute_kw(model, "search_read", vec![json!(domain)], kwargs).await?;
        match rows {
            Value::Array(rows) => match rows.into_iter().next() {
                None => Ok(None),
                Some(Value::Object(values)) => Ok(Some(Record::from(values))),
                Some(other) => Err(BridgeError::Integration(format!(
                    "{model}.search_read returned a non-object row: {other}"
                ))),
            },
            other => Err(BridgeError::Integration(format!(
                "{model}.search_read returned {other} instead of a list"
            ))),
        }
    }

    /// Id of the first record matching `domain`.
    async fn find_id(&self, model: &str, domain: &[Criterion]) -> Result<Option<RecordId>> {
        self.find_one(model, domain, &["id"]).await?.map(|record| record.id()).transpose()
    }

    /// Create one record and return its id.
    async fn create(&self, model: &str, values: Values) -> Result<RecordId> {
        let created =
            self.execute_kw(model, "create", vec![Value::Object(values)], Values::new()).await?;

        // Single-dict creates answer with an id; batch-style servers wrap it.
        let id = match &created {
            Value::Number(id) => id.as_i64(),
            Value::Array(ids) if ids.len() == 1 => ids[0].as_i64(),
            _ => None,
        };
        id.ok_or_else(|| {
            BridgeError::Integration(format!("{model}.create returned {created} instead of an id"))
        })
    }

    /// Overwrite `values` on the records `ids`.
    async fn write(&self, model: &str, ids: &[RecordId], values: Values) -> Result<()> {
        self.execute_kw(model, "write", vec![json!(ids), Value::Object(values)], Values::new())
            .await?;
        Ok(())
    }
}
