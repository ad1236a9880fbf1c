//! Per-type schemas and field dispatch.
//!
//! A [`Schema`] pairs a type's declared [`FieldBinding`]s with a dispatch
//! table mapping each field name to a typed accessor. The engine reads and
//! writes fields through [`FieldRef`] / [`FieldValue`] without knowing the
//! concrete type.

use crate::{ConfigNode, FieldBinding, KeyedCollection, ModelError, ModelResult, NodeSchema};
use cfgbind_types::{ScalarKind, ScalarType, ScalarValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;

/// How a nested node of this type is layered during merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// An overlay instance replaces the base instance wholesale (default).
    #[default]
    Replace,
    /// Base and overlay are merged field by field, recursively.
    FieldWise,
}

/// An owned value handed to a field setter.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Scalar(ScalarValue),
    Node(Box<dyn ConfigNode>),
    Collection(KeyedCollection<Box<dyn ConfigNode>>),
}

/// A borrowed view of a field's current content.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Scalar(Option<ScalarValue>),
    Node(Option<&'a dyn ConfigNode>),
    /// `(primary key, element)` pairs in collection order.
    Collection(Vec<(Option<&'a str>, &'a dyn ConfigNode)>),
}

/// The shape an accessor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar(ScalarKind),
    Node(&'static str),
    Collection(&'static str),
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Scalar(kind) => write!(f, "{kind} scalar"),
            FieldShape::Node(name) => write!(f, "{name} node"),
            FieldShape::Collection(name) => write!(f, "collection of {name}"),
        }
    }
}

trait FieldAccessor: Send + Sync {
    fn shape(&self) -> FieldShape;

    fn read<'a>(&self, node: &'a dyn ConfigNode) -> ModelResult<FieldRef<'a>>;

    fn write(&self, node: &mut dyn ConfigNode, value: FieldValue) -> ModelResult<()>;

    /// Schema of the nested node type, if any.
    fn nested(&self) -> Option<&'static Schema> {
        None
    }
}

fn downcast<T: NodeSchema>(node: &dyn ConfigNode) -> ModelResult<&T> {
    node.downcast_ref::<T>().ok_or_else(|| ModelError::WrongNode {
        expected: T::TYPE_NAME.into(),
        found: node.type_name().into(),
    })
}

fn downcast_mut<T: NodeSchema>(node: &mut dyn ConfigNode) -> ModelResult<&mut T> {
    let found = node.type_name();
    node.downcast_mut::<T>().ok_or_else(|| ModelError::WrongNode {
        expected: T::TYPE_NAME.into(),
        found: found.into(),
    })
}

fn unbox<C: NodeSchema>(node: Box<dyn ConfigNode>) -> Option<C> {
    node.into_any().downcast::<C>().ok().map(|b| *b)
}

struct ScalarAccessor<T, S> {
    field: &'static str,
    get: fn(&T) -> &Option<S>,
    get_mut: fn(&mut T) -> &mut Option<S>,
}

impl<T: NodeSchema, S: ScalarType> ScalarAccessor<T, S> {
    fn mismatch(&self) -> ModelError {
        ModelError::TypeMismatch {
            field: self.field.into(),
            owner: T::TYPE_NAME.into(),
            expected: self.shape().to_string(),
        }
    }
}

impl<T: NodeSchema, S: ScalarType> FieldAccessor for ScalarAccessor<T, S> {
    fn shape(&self) -> FieldShape {
        FieldShape::Scalar(S::KIND)
    }

    fn read<'a>(&self, node: &'a dyn ConfigNode) -> ModelResult<FieldRef<'a>> {
        let node = downcast::<T>(node)?;
        Ok(FieldRef::Scalar(
            (self.get)(node).clone().map(ScalarType::into_scalar),
        ))
    }

    fn write(&self, node: &mut dyn ConfigNode, value: FieldValue) -> ModelResult<()> {
        let FieldValue::Scalar(value) = value else {
            return Err(self.mismatch());
        };
        let typed = S::from_scalar(value).ok_or_else(|| self.mismatch())?;
        *(self.get_mut)(downcast_mut::<T>(node)?) = Some(typed);
        Ok(())
    }
}

struct NodeAccessor<T, C> {
    field: &'static str,
    get: fn(&T) -> &Option<C>,
    get_mut: fn(&mut T) -> &mut Option<C>,
}

impl<T: NodeSchema, C: NodeSchema> FieldAccessor for NodeAccessor<T, C> {
    fn shape(&self) -> FieldShape {
        FieldShape::Node(C::TYPE_NAME)
    }

    fn read<'a>(&self, node: &'a dyn ConfigNode) -> ModelResult<FieldRef<'a>> {
        let node = downcast::<T>(node)?;
        Ok(FieldRef::Node(
            (self.get)(node).as_ref().map(|c| c as &dyn ConfigNode),
        ))
    }

    fn write(&self, node: &mut dyn ConfigNode, value: FieldValue) -> ModelResult<()> {
        let mismatch = || ModelError::TypeMismatch {
            field: self.field.into(),
            owner: T::TYPE_NAME.into(),
            expected: self.shape().to_string(),
        };
        let FieldValue::Node(child) = value else {
            return Err(mismatch());
        };
        let child = unbox::<C>(child).ok_or_else(mismatch)?;
        *(self.get_mut)(downcast_mut::<T>(node)?) = Some(child);
        Ok(())
    }

    fn nested(&self) -> Option<&'static Schema> {
        Some(C::node_schema())
    }
}

struct CollectionAccessor<T, C> {
    field: &'static str,
    get: fn(&T) -> &KeyedCollection<C>,
    get_mut: fn(&mut T) -> &mut KeyedCollection<C>,
}

impl<T: NodeSchema, C: NodeSchema> FieldAccessor for CollectionAccessor<T, C> {
    fn shape(&self) -> FieldShape {
        FieldShape::Collection(C::TYPE_NAME)
    }

    fn read<'a>(&self, node: &'a dyn ConfigNode) -> ModelResult<FieldRef<'a>> {
        let node = downcast::<T>(node)?;
        Ok(FieldRef::Collection(
            (self.get)(node)
                .entries()
                .map(|(key, item)| (key, item as &dyn ConfigNode))
                .collect(),
        ))
    }

    fn write(&self, node: &mut dyn ConfigNode, value: FieldValue) -> ModelResult<()> {
        let mismatch = || ModelError::TypeMismatch {
            field: self.field.into(),
            owner: T::TYPE_NAME.into(),
            expected: self.shape().to_string(),
        };
        let FieldValue::Collection(items) = value else {
            return Err(mismatch());
        };
        let typed = items.try_map(|item| unbox::<C>(item).ok_or_else(mismatch))?;
        *(self.get_mut)(downcast_mut::<T>(node)?) = typed;
        Ok(())
    }

    fn nested(&self) -> Option<&'static Schema> {
        Some(C::node_schema())
    }
}

/// A node type's binding table and accessor dispatch table.
pub struct Schema {
    type_name: &'static str,
    bindings: Vec<FieldBinding>,
    accessors: HashMap<&'static str, Box<dyn FieldAccessor>>,
    value: Option<Box<dyn FieldAccessor>>,
    merge_strategy: MergeStrategy,
    factory: fn() -> Box<dyn ConfigNode>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("bindings", &self.bindings)
            .field("value", &self.value_kind())
            .field("merge_strategy", &self.merge_strategy)
            .finish_non_exhaustive()
    }
}

impl Schema {
    /// Starts declaring the schema of `T`.
    #[must_use]
    pub fn builder<T: NodeSchema>() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }

    /// Returns the schema in `cell`, building it on first use.
    ///
    /// Concurrent first calls may each run `build`; the first stored result
    /// wins and the others are dropped. Builds are deterministic, so every
    /// caller observes an equal schema.
    pub fn cached(cell: &'static OnceLock<Schema>, build: fn() -> Schema) -> &'static Schema {
        if let Some(schema) = cell.get() {
            return schema;
        }
        let built = build();
        cell.get_or_init(|| built)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared bindings, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Binding metadata for one field.
    #[must_use]
    pub fn binding(&self, field: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.field_name == field)
    }

    #[must_use]
    pub fn merge_strategy(&self) -> MergeStrategy {
        self.merge_strategy
    }

    /// True if this type wraps a single leaf value.
    #[must_use]
    pub fn is_value_wrapper(&self) -> bool {
        self.value.is_some()
    }

    /// Kind of the wrapped value, for value wrappers.
    #[must_use]
    pub fn value_kind(&self) -> Option<ScalarKind> {
        match self.value.as_ref().map(|a| a.shape()) {
            Some(FieldShape::Scalar(kind)) => Some(kind),
            _ => None,
        }
    }

    /// Accessor shape of a field.
    #[must_use]
    pub fn shape(&self, field: &str) -> Option<FieldShape> {
        self.accessors.get(field).map(|a| a.shape())
    }

    /// Creates a default instance of the type.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn ConfigNode> {
        (self.factory)()
    }

    /// Reads a field through the dispatch table.
    pub fn read<'a>(&self, node: &'a dyn ConfigNode, field: &str) -> ModelResult<FieldRef<'a>> {
        self.accessor(field)?.read(node)
    }

    /// Writes a field through the dispatch table.
    pub fn write(&self, node: &mut dyn ConfigNode, field: &str, value: FieldValue) -> ModelResult<()> {
        self.accessor(field)?.write(node, value)
    }

    /// Reads the wrapped value of a value wrapper.
    pub fn read_value(&self, node: &dyn ConfigNode) -> ModelResult<Option<ScalarValue>> {
        match self.value_accessor()?.read(node)? {
            FieldRef::Scalar(value) => Ok(value),
            _ => Err(ModelError::NotAValueWrapper(self.type_name.into())),
        }
    }

    /// Writes the wrapped value of a value wrapper.
    pub fn write_value(&self, node: &mut dyn ConfigNode, value: ScalarValue) -> ModelResult<()> {
        self.value_accessor()?.write(node, FieldValue::Scalar(value))
    }

    /// Schemas of every nested node type this schema's accessors reference.
    pub fn nested_schemas(&self) -> impl Iterator<Item = &'static Schema> + '_ {
        self.bindings
            .iter()
            .filter_map(|b| self.accessors.get(b.field_name.as_str()))
            .filter_map(|a| a.nested())
    }

    fn accessor(&self, field: &str) -> ModelResult<&dyn FieldAccessor> {
        self.accessors
            .get(field)
            .map(|a| &**a)
            .ok_or_else(|| ModelError::UnknownField {
                field: field.into(),
                owner: self.type_name.into(),
            })
    }

    fn value_accessor(&self) -> ModelResult<&dyn FieldAccessor> {
        self.value
            .as_deref()
            .ok_or_else(|| ModelError::NotAValueWrapper(self.type_name.into()))
    }
}

fn instantiate<T: NodeSchema>() -> Box<dyn ConfigNode> {
    Box::new(T::default())
}

/// Declares a [`Schema`] for node type `T`.
///
/// Each method records a [`FieldBinding`] and the accessor pair used to
/// read and write the field. Paths default to the field name.
pub struct SchemaBuilder<T> {
    bindings: Vec<FieldBinding>,
    accessors: HashMap<&'static str, Box<dyn FieldAccessor>>,
    value: Option<Box<dyn FieldAccessor>>,
    merge_strategy: MergeStrategy,
    _marker: PhantomData<fn() -> T>,
}

impl<T: NodeSchema> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeSchema> SchemaBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            accessors: HashMap::new(),
            value: None,
            merge_strategy: MergeStrategy::default(),
            _marker: PhantomData,
        }
    }

    fn field(mut self, binding: FieldBinding, field: &'static str, accessor: Box<dyn FieldAccessor>) -> Self {
        self.bindings.retain(|b| b.field_name != field);
        self.bindings.push(binding);
        self.accessors.insert(field, accessor);
        self
    }

    /// A scalar field bound at its own name.
    #[must_use]
    pub fn scalar<S: ScalarType>(
        self,
        field: &'static str,
        get: fn(&T) -> &Option<S>,
        get_mut: fn(&mut T) -> &mut Option<S>,
    ) -> Self {
        self.scalar_at(field, field, get, get_mut)
    }

    /// A scalar field bound at an explicit path.
    #[must_use]
    pub fn scalar_at<S: ScalarType>(
        self,
        field: &'static str,
        path: &str,
        get: fn(&T) -> &Option<S>,
        get_mut: fn(&mut T) -> &mut Option<S>,
    ) -> Self {
        let binding = FieldBinding::scalar(field, S::KIND).at(path);
        self.field(binding, field, Box::new(ScalarAccessor { field, get, get_mut }))
    }

    /// A nested node field bound at its own name.
    #[must_use]
    pub fn node<C: NodeSchema>(
        self,
        field: &'static str,
        get: fn(&T) -> &Option<C>,
        get_mut: fn(&mut T) -> &mut Option<C>,
    ) -> Self {
        self.node_at(field, field, get, get_mut)
    }

    /// A nested node field bound at an explicit path.
    #[must_use]
    pub fn node_at<C: NodeSchema>(
        self,
        field: &'static str,
        path: &str,
        get: fn(&T) -> &Option<C>,
        get_mut: fn(&mut T) -> &mut Option<C>,
    ) -> Self {
        let binding = FieldBinding::node(field, C::TYPE_NAME).at(path);
        self.field(binding, field, Box::new(NodeAccessor { field, get, get_mut }))
    }

    /// A collection field bound at its own name.
    #[must_use]
    pub fn array<C: NodeSchema>(
        self,
        field: &'static str,
        get: fn(&T) -> &KeyedCollection<C>,
        get_mut: fn(&mut T) -> &mut KeyedCollection<C>,
    ) -> Self {
        self.array_at(field, field, get, get_mut)
    }

    /// A collection field bound at an explicit path, e.g. `params/param`.
    #[must_use]
    pub fn array_at<C: NodeSchema>(
        self,
        field: &'static str,
        path: &str,
        get: fn(&T) -> &KeyedCollection<C>,
        get_mut: fn(&mut T) -> &mut KeyedCollection<C>,
    ) -> Self {
        let binding = FieldBinding::array(field, C::TYPE_NAME).at(path);
        self.field(binding, field, Box::new(CollectionAccessor { field, get, get_mut }))
    }

    /// Marks `T` as a value wrapper whose text is held in the given field.
    #[must_use]
    pub fn value<S: ScalarType>(
        mut self,
        get: fn(&T) -> &Option<S>,
        get_mut: fn(&mut T) -> &mut Option<S>,
    ) -> Self {
        self.value = Some(Box::new(ScalarAccessor {
            field: "value",
            get,
            get_mut,
        }));
        self
    }

    /// Records binding metadata without an accessor.
    ///
    /// Used for metadata loaded from elsewhere (e.g. a generated registry);
    /// binding such a field fails unless its type resolves and an accessor
    /// is added later.
    #[must_use]
    pub fn declare(mut self, binding: FieldBinding) -> Self {
        self.bindings.retain(|b| b.field_name != binding.field_name);
        self.bindings.push(binding);
        self
    }

    #[must_use]
    pub fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            type_name: T::TYPE_NAME,
            bindings: self.bindings,
            accessors: self.accessors,
            value: self.value,
            merge_strategy: self.merge_strategy,
            factory: instantiate::<T>,
        }
    }
}
