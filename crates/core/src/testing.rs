//! In-memory ERP gateway for tests (feature: test-utils)
//!
//! Implements the object protocol subset the bridge uses (`search_read` with
//! equality domains, `create`, `write`) over per-model record lists, and
//! records every interaction so tests can assert on what reached the ERP.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mesbridge_domain::{BridgeError, RecordId, Result, UserId};
use serde_json::{json, Value};

use crate::erp_ports::{ErpGateway, Values};

/// User id returned by a successful `authenticate`.
pub const FAKE_UID: UserId = 2;

/// One `execute_kw` call as seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct ErpCall {
    pub model: String,
    pub method: String,
    pub args: Vec<Value>,
    pub kwargs: Values,
}

#[derive(Default)]
struct State {
    next_id: RecordId,
    records: BTreeMap<String, Vec<Values>>,
    calls: Vec<ErpCall>,
    auth_attempts: usize,
    auth_failure: Option<String>,
    failures: Vec<(String, String, String)>,
}

/// In-memory stand-in for the ERP
pub struct InMemoryErp {
    state: Mutex<State>,
}

impl Default for InMemoryErp {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryErp {
    pub fn new() -> Self {
        Self { state: Mutex::new(State { next_id: 100, ..State::default() }) }
    }

    /// Seed a record; an `id` is assigned when the fixture has none.
    pub fn with_record(self, model: &str, fields: Value) -> Self {
        self.insert(model, fields);
        self
    }

    /// Make `authenticate` fail with [`BridgeError::Auth`].
    pub fn failing_auth(self, message: &str) -> Self {
        self.lock().auth_failure = Some(message.to_string());
        self
    }

    /// Make `model.method` fail with [`BridgeError::Integration`].
    pub fn failing_on(self, model: &str, method: &str, message: &str) -> Self {
        self.lock().failures.push((model.to_string(), method.to_string(), message.to_string()));
        self
    }

    pub fn insert(&self, model: &str, fields: Value) -> RecordId {
        let mut values = match fields {
            Value::Object(values) => values,
            other => panic!("fixture for {model} must be an object, got {other}"),
        };
        let mut state = self.lock();
        let id = match values.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => {
                state.next_id += 1;
                state.next_id
            }
        };
        values.insert("id".to_string(), json!(id));
        state.records.entry(model.to_string()).or_default().push(values);
        id
    }

    pub fn records(&self, model: &str) -> Vec<Values> {
        self.lock().records.get(model).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<ErpCall> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, model: &str, method: &str) -> Vec<ErpCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.model == model && call.method == method)
            .cloned()
            .collect()
    }

    pub fn auth_attempts(&self) -> usize {
        self.lock().auth_attempts
    }

    /// Authentication attempts plus `execute_kw` calls.
    pub fn interaction_count(&self) -> usize {
        let state = self.lock();
        state.auth_attempts + state.calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn search_read(&self, model: &str, args: &[Value], kwargs: &Values) -> Result<Value> {
        let domain = args.first().and_then(Value::as_array).cloned().unwrap_or_default();
        let limit = kwargs.get("limit").and_then(Value::as_u64).map_or(usize::MAX, |l| l as usize);
        let fields: Vec<String> = kwargs
            .get("fields")
            .and_then(Value::as_array)
            .map(|f| f.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        let rows = self
            .records(model)
            .into_iter()
            .filter(|record| domain.iter().all(|term| matches_term(record, term)))
            .take(limit)
            .map(|record| project(record, &fields))
            .collect();
        Ok(Value::Array(rows))
    }

    fn apply_create(&self, model: &str, args: &[Value]) -> Result<Value> {
        match args.first() {
            Some(values @ Value::Object(_)) => Ok(json!(self.insert(model, values.clone()))),
            _ => Err(BridgeError::Integration(format!("{model}.create expects a values dict"))),
        }
    }

    fn apply_write(&self, model: &str, args: &[Value]) -> Result<Value> {
        let ids: Vec<i64> = args
            .first()
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();
        let Some(Value::Object(values)) = args.get(1) else {
            return Err(BridgeError::Integration(format!("{model}.write expects a values dict")));
        };

        let mut state = self.lock();
        let records = state.records.entry(model.to_string()).or_default();
        for record in records.iter_mut() {
            if record.get("id").and_then(Value::as_i64).is_some_and(|id| ids.contains(&id)) {
                for (field, value) in values {
                    record.insert(field.clone(), value.clone());
                }
            }
        }
        Ok(Value::Bool(true))
    }
}

fn matches_term(record: &Values, term: &Value) -> bool {
    match term.as_array().map(Vec::as_slice) {
        Some([Value::String(field), Value::String(op), expected]) if op == "=" => {
            record.get(field) == Some(expected)
        }
        _ => false,
    }
}

fn project(record: Values, fields: &[String]) -> Value {
    if fields.is_empty() {
        return Value::Object(record);
    }
    let mut row = Values::new();
    for (field, value) in record {
        if field == "id" || fields.contains(&field) {
            row.insert(field, value);
        }
    }
    Value::Object(row)
}

#[async_trait]
impl ErpGateway for InMemoryErp {
    async fn authenticate(&self) -> Result<UserId> {
        let mut state = self.lock();
        state.auth_attempts += 1;
        match &state.auth_failure {
            Some(message) => Err(BridgeError::Auth(message.clone())),
            None => Ok(FAKE_UID),
        }
    }

    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Values,
    ) -> Result<Value> {
        let failure = {
            let mut state = self.lock();
            state.calls.push(ErpCall {
                model: model.to_string(),
                method: method.to_string(),
                args: args.clone(),
                kwargs: kwargs.clone(),
            });
            state
                .failures
                .iter()
                .find(|(m, meth, _)| m == model && meth == method)
                .map(|(_, _, message)| message.clone())
        };
        if let Some(message) = failure {
            return Err(BridgeError::Integration(message));
        }

        match method {
            "search_read" => self.search_read(model, &args, &kwargs),
            "create" => self.apply_create(model, &args),
            "write" => self.apply_write(model, &args),
            other => Err(BridgeError::Integration(format!("{model}.{other} is not supported"))),
        }
    }
}
