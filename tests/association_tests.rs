//! 关联与持久化适配器集成测试
//!
//! 使用记录调用的桩适配器验证：适配器每次调用重新解析、
//! 宿主键值先经类型转换、构建/保存操作的精确转发

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rat_activedata::{
    ActiveDataConfig, ActiveDataError, AdapterRegistry, Association, BackendKey, DataValue,
    ModelInstance, PersistOptions, PersistenceAdapter, QueryScope, RecordHandle, ReferencesAny,
    Reflection, ScopePredicate, TypecastEngine, TypecasterRegistry,
};

/// 桩查询句柄：记录构造参数，从不执行查询
struct StubScope {
    backend: String,
    data_source: String,
    source: DataValue,
}

impl QueryScope for StubScope {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 范围谓词包装后的句柄
struct FilteredScope {
    inner: Box<dyn QueryScope>,
}

impl QueryScope for FilteredScope {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct StubRecord {
    attributes: HashMap<String, DataValue>,
    persisted: bool,
}

impl RecordHandle for StubRecord {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn attributes(&self) -> HashMap<String, DataValue> {
        self.attributes.clone()
    }
    fn is_persisted(&self) -> bool {
        self.persisted
    }
}

type CallLog = Arc<Mutex<Vec<String>>>;

struct StubAdapter {
    backend: String,
    data_source: String,
    scope_predicate: Option<ScopePredicate>,
    persist_outcome: bool,
    calls: CallLog,
}

impl PersistenceAdapter for StubAdapter {
    fn scope(&self, _owner: &dyn ModelInstance, source: &DataValue) -> Box<dyn QueryScope> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("scope({:?})", source));
        let scope: Box<dyn QueryScope> = Box::new(StubScope {
            backend: self.backend.clone(),
            data_source: self.data_source.clone(),
            source: source.clone(),
        });
        match &self.scope_predicate {
            Some(predicate) => predicate(scope),
            None => scope,
        }
    }

    fn build(&self, attributes: HashMap<String, DataValue>) -> Box<dyn RecordHandle> {
        let mut keys: Vec<&str> = attributes.keys().map(|k| k.as_str()).collect();
        keys.sort();
        self.calls
            .lock()
            .unwrap()
            .push(format!("build({})", keys.join(",")));
        Box::new(StubRecord {
            attributes,
            persisted: false,
        })
    }

    fn persist(&self, record: &mut dyn RecordHandle, options: &PersistOptions) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(format!("persist(options={})", options.len()));
        if self.persist_outcome {
            if let Some(stub) = record.as_any_mut().downcast_mut::<StubRecord>() {
                stub.persisted = true;
            }
        }
        self.persist_outcome
    }
}

fn register_stub(registry: &AdapterRegistry, backend_key: &str, persist_outcome: bool) -> CallLog {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();
    let backend = backend_key.to_string();
    registry.register(backend_key, move |data_source, _primary_key, predicate| {
        Arc::new(StubAdapter {
            backend: backend.clone(),
            data_source: data_source.to_string(),
            scope_predicate: predicate,
            persist_outcome,
            calls: log.clone(),
        })
    });
    calls
}

/// 属性可变的桩宿主
struct FakeOwner {
    attrs: RefCell<HashMap<String, DataValue>>,
}

impl FakeOwner {
    fn new(pairs: &[(&str, DataValue)]) -> Self {
        Self {
            attrs: RefCell::new(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ),
        }
    }

    fn set(&self, name: &str, value: DataValue) {
        self.attrs.borrow_mut().insert(name.to_string(), value);
    }
}

impl ModelInstance for FakeOwner {
    fn attribute(&self, name: &str) -> DataValue {
        self.attrs.borrow().get(name).cloned().unwrap_or(DataValue::Null)
    }

    fn model_name(&self) -> &str {
        "fake_owner"
    }
}

fn engine() -> TypecastEngine {
    TypecastEngine::new(
        Arc::new(TypecasterRegistry::with_builtins()),
        Arc::new(ActiveDataConfig::default()),
    )
}

#[test]
fn test_end_to_end_build_and_persist_through_stub() {
    let registry = Arc::new(AdapterRegistry::new());
    let calls = register_stub(&registry, "fake", true);

    let reflection = Arc::new(Reflection::new(
        "target",
        BackendKey::Static("fake".to_string()),
        "targets",
    ));
    let owner = FakeOwner::new(&[("target_id", DataValue::String("7".to_string()))]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    let mut record = association
        .build_object(HashMap::from([(
            "name".to_string(),
            DataValue::String("x".to_string()),
        )]))
        .unwrap();
    assert!(!record.is_persisted());
    assert_eq!(
        record.attributes().get("name"),
        Some(&DataValue::String("x".to_string()))
    );
    assert_eq!(calls.lock().unwrap().as_slice(), ["build(name)"]);

    let outcome = association
        .persist_object(record.as_mut(), &PersistOptions::new())
        .unwrap();
    assert!(outcome);
    assert!(record.is_persisted());
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["build(name)", "persist(options=0)"]
    );
}

#[test]
fn test_persist_failure_is_a_flag_not_an_error() {
    let registry = Arc::new(AdapterRegistry::new());
    let _calls = register_stub(&registry, "fake", false);

    let reflection = Arc::new(Reflection::new(
        "target",
        BackendKey::Static("fake".to_string()),
        "targets",
    ));
    let owner = FakeOwner::new(&[]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    let mut record = association.build_object(HashMap::new()).unwrap();
    let outcome = association
        .persist_object(record.as_mut(), &PersistOptions::new())
        .unwrap();
    assert!(!outcome);
    assert!(!record.is_persisted());
}

#[test]
fn test_unregistered_backend_key_is_fatal() {
    let registry = Arc::new(AdapterRegistry::new());
    let reflection = Arc::new(Reflection::new(
        "target",
        BackendKey::Static("missing".to_string()),
        "targets",
    ));
    let owner = FakeOwner::new(&[]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    match association.scope(None) {
        Err(ActiveDataError::AdapterNotFound { backend_key }) => {
            assert_eq!(backend_key, "missing");
        }
        other => panic!("期望 AdapterNotFound，得到: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_scope_uses_typecast_owner_key() {
    let registry = Arc::new(AdapterRegistry::new());
    let _calls = register_stub(&registry, "fake", true);

    let reflection = Arc::new(
        Reflection::new("author", BackendKey::Static("fake".to_string()), "authors")
            .source_type("Integer"),
    );
    // 宿主属性里存的是弱类型字符串
    let owner = FakeOwner::new(&[("author_id", DataValue::String("42.9".to_string()))]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    assert_eq!(association.read_source(), DataValue::Int(42));

    let scope = association.scope(None).unwrap();
    let stub = scope.as_any().downcast_ref::<StubScope>().unwrap();
    assert_eq!(stub.source, DataValue::Int(42));
    assert_eq!(stub.data_source, "authors");
}

#[test]
fn test_scope_override_bypasses_owner_attribute() {
    let registry = Arc::new(AdapterRegistry::new());
    let _calls = register_stub(&registry, "fake", true);

    let reflection = Arc::new(Reflection::new(
        "author",
        BackendKey::Static("fake".to_string()),
        "authors",
    ));
    let owner = FakeOwner::new(&[("author_id", DataValue::String("1".to_string()))]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    let scope = association.scope(Some(&DataValue::Int(7))).unwrap();
    let stub = scope.as_any().downcast_ref::<StubScope>().unwrap();
    assert_eq!(stub.source, DataValue::Int(7));
}

#[test]
fn test_adapter_re_resolved_from_live_owner_state() {
    let registry = Arc::new(AdapterRegistry::new());
    let _memory_calls = register_stub(&registry, "memory", true);
    let _sql_calls = register_stub(&registry, "sql", true);

    let reflection = Arc::new(Reflection::new(
        "target",
        BackendKey::OwnerAttribute("target_type".to_string()),
        "targets",
    ));
    let owner = FakeOwner::new(&[
        ("target_type", DataValue::String("memory".to_string())),
        ("target_id", DataValue::String("1".to_string())),
    ]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    let first = association.scope(None).unwrap();
    assert_eq!(
        first.as_any().downcast_ref::<StubScope>().unwrap().backend,
        "memory"
    );

    // 修改宿主的判别属性后，第二次解析必须观察到新值
    owner.set("target_type", DataValue::String("sql".to_string()));
    let second = association.scope(None).unwrap();
    assert_eq!(
        second.as_any().downcast_ref::<StubScope>().unwrap().backend,
        "sql"
    );
}

#[test]
fn test_scope_predicate_forwarded_to_backend() {
    let registry = Arc::new(AdapterRegistry::new());
    let _calls = register_stub(&registry, "fake", true);

    let predicate: ScopePredicate =
        Arc::new(|scope| Box::new(FilteredScope { inner: scope }));
    let reflection = Arc::new(
        Reflection::new("target", BackendKey::Static("fake".to_string()), "targets")
            .scope_predicate(predicate),
    );
    let owner = FakeOwner::new(&[("target_id", DataValue::String("1".to_string()))]);
    let association = ReferencesAny::new(&owner, reflection, registry, engine());

    let scope = association.scope(None).unwrap();
    let filtered = scope.as_any().downcast_ref::<FilteredScope>().unwrap();
    assert!(filtered.inner.as_any().downcast_ref::<StubScope>().is_some());
}
