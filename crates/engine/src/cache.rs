//! Per-instance adapter cache
//!
//! Memoizes nested codecs by resolved descriptor, for the lifetime of one
//! owning codec instance. Each slot is constructed at most once, with
//! double-checked lazy initialization; a re-entrant request for a descriptor
//! currently under construction receives a deferred handle backed by the
//! same slot, so cyclic type graphs terminate at construction time and pay
//! their recursion per value instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use forge_core::{TypeDescriptor, Value};
use forge_wire::{JsonReader, JsonWriter};

use crate::codec::{Codec, CodecCtx};
use crate::error::CodecError;

/// Builds the codec for a descriptor on first request.
pub(crate) type BuildFn<'a> = dyn Fn(&TypeDescriptor) -> Result<Arc<dyn Codec>, CodecError> + 'a;

#[derive(Default)]
struct CacheSlot {
    cell: OnceCell<Arc<dyn Codec>>,
    building: AtomicBool,
}

/// Descriptor-keyed codec memoization, owned by one codec instance.
#[derive(Default)]
pub struct AdapterCache {
    slots: Mutex<FxHashMap<TypeDescriptor, Arc<CacheSlot>>>,
}

impl AdapterCache {
    /// An empty cache.
    pub fn new() -> Self {
        AdapterCache::default()
    }

    /// Get the memoized codec for `descriptor`, building it on first use.
    ///
    /// The slot is registered before `build` runs, so if `build` re-enters
    /// for the same descriptor it receives a deferred handle instead of
    /// recursing. A failed build leaves the slot empty and retriable.
    pub(crate) fn get_with(
        &self,
        descriptor: &TypeDescriptor,
        build: &BuildFn<'_>,
    ) -> Result<Arc<dyn Codec>, CodecError> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(
                slots
                    .entry(descriptor.clone())
                    .or_insert_with(|| Arc::new(CacheSlot::default())),
            )
        };
        if let Some(codec) = slot.cell.get() {
            return Ok(Arc::clone(codec));
        }
        if slot.building.swap(true, Ordering::AcqRel) {
            return Ok(Arc::new(DeferredCodec { slot }));
        }
        let result = build(descriptor);
        slot.building.store(false, Ordering::Release);
        let codec = result?;
        let _ = slot.cell.set(Arc::clone(&codec));
        Ok(codec)
    }

    /// Number of descriptors with a slot (filled or pending).
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Whether the cache has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

// Handed out for re-entrant requests; delegates to the slot filled when the
// outer construction completes.
struct DeferredCodec {
    slot: Arc<CacheSlot>,
}

impl DeferredCodec {
    fn delegate(&self) -> Result<&Arc<dyn Codec>, CodecError> {
        self.slot.cell.get().ok_or_else(|| {
            CodecError::Internal("codec used before its construction completed".to_string())
        })
    }
}

impl Codec for DeferredCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        self.delegate()?.encode(ctx, writer, value)
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        self.delegate()?.decode(ctx, reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use forge_core::RawType;

    struct StubCodec;

    impl Codec for StubCodec {
        fn encode(
            &self,
            _ctx: &CodecCtx<'_>,
            writer: &mut dyn JsonWriter,
            _value: &Value,
        ) -> Result<(), CodecError> {
            writer.null_value()?;
            Ok(())
        }

        fn decode(
            &self,
            _ctx: &CodecCtx<'_>,
            reader: &mut dyn JsonReader,
        ) -> Result<Value, CodecError> {
            reader.next_null()?;
            Ok(Value::Null)
        }
    }

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::simple(RawType::Int)
    }

    #[test]
    fn builds_once_and_memoizes() {
        let cache = AdapterCache::new();
        let calls = AtomicUsize::new(0);
        let build = |_: &TypeDescriptor| -> Result<Arc<dyn Codec>, CodecError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubCodec))
        };
        let first = cache.get_with(&descriptor(), &build).unwrap();
        let second = cache.get_with(&descriptor(), &build).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reentrant_request_gets_deferred_handle() {
        let cache = AdapterCache::new();
        let build = |_: &TypeDescriptor| -> Result<Arc<dyn Codec>, CodecError> {
            // The type's construction requests itself, as a cyclic schema
            // would. It must get a handle back, not recurse.
            let inner = cache.get_with(&descriptor(), &|_| {
                panic!("re-entrant request must not rebuild")
            })?;
            let _ = inner;
            Ok(Arc::new(StubCodec))
        };
        cache.get_with(&descriptor(), &build).unwrap();
        // After construction, the slot serves the real codec.
        let resolved = cache
            .get_with(&descriptor(), &|_| {
                panic!("slot is filled; build must not run")
            })
            .unwrap();
        let mut writer = forge_wire::TextWriter::new();
        // A deferred handle obtained now would also delegate successfully;
        // the filled slot is what both paths share.
        let engine = crate::engine::Engine::new(std::sync::Arc::new(
            crate::surface::StaticProvider::new(),
        ));
        let ctx = CodecCtx::new(&engine, &cache);
        resolved.encode(&ctx, &mut writer, &Value::Null).unwrap();
        assert_eq!(writer.finish().unwrap(), "null");
    }

    #[test]
    fn failed_build_is_retriable() {
        let cache = AdapterCache::new();
        let result = cache.get_with(&descriptor(), &|_| {
            Err(CodecError::Internal("boom".to_string()))
        });
        let err = match result {
            Err(e) => e,
            Ok(_) => panic!("expected error"),
        };
        assert!(matches!(err, CodecError::Internal(_)));
        // The slot was not poisoned; a later build succeeds.
        cache
            .get_with(&descriptor(), &|_| Ok(Arc::new(StubCodec) as Arc<dyn Codec>))
            .unwrap();
    }
}
