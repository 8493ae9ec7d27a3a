// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Signature-erased member bindings.
//!
//! Generated proxies describe each forwarding member with a
//! [`MemberSignature`] and build one invoker per member, picking the
//! constructor that matches the member's shape. The result is a tagged union
//! ([`Invoker`]) over the three shapes an activity member can have, so a
//! dispatcher can call any member with erased JSON payloads without knowing
//! its concrete types.

use crate::error::InvokeError;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Erased argument or result value.
pub type Payload = serde_json::Value;

/// Return shape of a forwarding member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    /// Synchronous member without a return value.
    Void,
    /// Asynchronous member that completes without a value.
    Completion,
    /// Asynchronous member that completes with one value.
    CompletionWithValue,
}

/// One declared parameter of a forwarding member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSignature {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// Static description of a forwarding member, emitted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberSignature {
    /// Member name as declared on the trait.
    pub member_name: &'static str,
    /// Literal tag-name override from `#[activity("...")]`, if any.
    pub activity_name: Option<&'static str>,
    /// Parameters in declaration order.
    pub parameters: &'static [ParameterSignature],
    /// Declared return type, fully qualified.
    pub return_type: &'static str,
    pub shape: ReturnShape,
}

impl MemberSignature {
    /// Name the dispatcher registers this member under.
    pub fn tag(&self) -> &'static str {
        self.activity_name.unwrap_or(self.member_name)
    }
}

/// Erased arguments handed to a generated invoker, consumed in declaration order.
#[derive(Debug)]
pub struct Arguments {
    values: std::vec::IntoIter<Payload>,
}

impl Arguments {
    pub fn new(values: Vec<Payload>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    /// Decode the next argument as the declared type of `parameter`.
    pub fn next<T: DeserializeOwned>(&mut self, parameter: &'static str) -> Result<T, InvokeError> {
        let value = self
            .values
            .next()
            .ok_or(InvokeError::MissingArgument { parameter })?;
        serde_json::from_value(value).map_err(|source| InvokeError::Decode { parameter, source })
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// Encode a member's result as a payload.
pub fn encode_output<T: Serialize>(output: T) -> Result<Payload, InvokeError> {
    serde_json::to_value(output).map_err(InvokeError::Encode)
}

type VoidFn = dyn Fn(Arguments) -> Result<(), InvokeError> + Send + Sync;
type CompletionFn = dyn Fn(Arguments) -> BoxFuture<'static, Result<(), InvokeError>> + Send + Sync;
type ValueFn = dyn Fn(Arguments) -> BoxFuture<'static, Result<Payload, InvokeError>> + Send + Sync;

/// Invoker for one member, one variant per [`ReturnShape`].
#[derive(Clone)]
pub enum Invoker {
    Void(Arc<VoidFn>),
    Completion(Arc<CompletionFn>),
    CompletionWithValue(Arc<ValueFn>),
}

impl Invoker {
    pub fn shape(&self) -> ReturnShape {
        match self {
            Self::Void(_) => ReturnShape::Void,
            Self::Completion(_) => ReturnShape::Completion,
            Self::CompletionWithValue(_) => ReturnShape::CompletionWithValue,
        }
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invoker::{:?}", self.shape())
    }
}

/// A forwarding member bound to a live proxy instance.
#[derive(Debug, Clone)]
pub struct MemberBinding {
    signature: MemberSignature,
    invoker: Invoker,
}

impl MemberBinding {
    /// Bind a synchronous member without a return value.
    pub fn void<F>(signature: MemberSignature, invoke: F) -> Self
    where
        F: Fn(Arguments) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        Self {
            signature,
            invoker: Invoker::Void(Arc::new(invoke)),
        }
    }

    /// Bind an asynchronous member that completes without a value.
    pub fn completion<F, Fut>(signature: MemberSignature, invoke: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), InvokeError>> + Send + 'static,
    {
        Self {
            signature,
            invoker: Invoker::Completion(Arc::new(move |arguments| {
                Box::pin(invoke(arguments)) as BoxFuture<'static, _>
            })),
        }
    }

    /// Bind an asynchronous member that completes with a value.
    pub fn completion_with_value<F, Fut>(signature: MemberSignature, invoke: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Payload, InvokeError>> + Send + 'static,
    {
        Self {
            signature,
            invoker: Invoker::CompletionWithValue(Arc::new(move |arguments| {
                Box::pin(invoke(arguments)) as BoxFuture<'static, _>
            })),
        }
    }

    pub fn signature(&self) -> &MemberSignature {
        &self.signature
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

/// Signature-erased handle to one member of one proxy instance.
///
/// Built by discovery; the dispatcher registers it under
/// [`CallableHandle::activity_name`] and calls [`CallableHandle::invoke`].
#[derive(Debug, Clone)]
pub struct CallableHandle {
    proxy_type: &'static str,
    binding: MemberBinding,
}

impl CallableHandle {
    pub(crate) fn new(proxy_type: &'static str, binding: MemberBinding) -> Self {
        Self {
            proxy_type,
            binding,
        }
    }

    /// Fully qualified name of the proxy type this handle is bound to.
    pub fn proxy_type(&self) -> &'static str {
        self.proxy_type
    }

    /// Member name as declared on the source trait.
    pub fn member_name(&self) -> &'static str {
        self.binding.signature.member_name
    }

    /// Tag-name override if present, else the member name.
    pub fn activity_name(&self) -> &'static str {
        self.binding.signature.tag()
    }

    pub fn signature(&self) -> &MemberSignature {
        &self.binding.signature
    }

    pub fn shape(&self) -> ReturnShape {
        self.binding.invoker.shape()
    }

    /// Invoke the bound member with erased arguments.
    ///
    /// Returns `Ok(Some(payload))` for members that complete with a value and
    /// `Ok(None)` otherwise. The argument count is checked against the
    /// member signature before anything is dispatched.
    pub async fn invoke(&self, arguments: Vec<Payload>) -> Result<Option<Payload>, InvokeError> {
        let signature = &self.binding.signature;
        if arguments.len() != signature.parameters.len() {
            return Err(InvokeError::Arity {
                member: signature.member_name,
                expected: signature.parameters.len(),
                actual: arguments.len(),
            });
        }

        let arguments = Arguments::new(arguments);
        match &self.binding.invoker {
            Invoker::Void(invoke) => invoke(arguments).map(|()| None),
            Invoker::Completion(invoke) => invoke(arguments).await.map(|()| None),
            Invoker::CompletionWithValue(invoke) => invoke(arguments).await.map(Some),
        }
    }
}
