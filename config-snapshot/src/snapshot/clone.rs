//! Cycle- and depth-bounded traversal that builds a [`SafeValue`] tree.

use std::borrow::Cow;

use slog::{debug, trace, Logger};

use super::{
    normalize::normalize,
    redact::Redactor,
    safe::{SafeValue, Sentinel},
};
use crate::{
    describe::{Describe, Guarded, Identity, Mapping, Record, Scalar, Sequence, Shape},
    error::AccessError,
    options::SnapshotOptions,
};

/// State of one capture: the containers on the current path.
///
/// A container is cyclic when it is already on the path, so a DAG that
/// reaches the same node through two branches is captured twice, not marked.
pub(crate) struct Traversal<'o> {
    options: &'o SnapshotOptions,
    redactor: Redactor<'o>,
    logger: &'o Logger,
    ancestors: Vec<Identity>,
}

impl<'o> Traversal<'o> {
    pub(crate) fn new(options: &'o SnapshotOptions, logger: &'o Logger) -> Self {
        Self {
            options,
            redactor: Redactor::new(options),
            logger,
            ancestors: Vec::new(),
        }
    }

    /// Captures `root`. The result is always a mapping.
    pub(crate) fn run(mut self, root: &dyn Describe) -> SafeValue {
        match self.clone_node(root, 0) {
            Ok(tree @ SafeValue::Mapping(_)) => tree,
            Ok(other) => SafeValue::Mapping(vec![("Value".to_owned(), other)]),
            Err(err) => {
                debug!(self.logger, "root could not be read, exporting an empty mapping"; "error" => %err);
                SafeValue::empty_mapping()
            }
        }
    }

    fn clone_node(&mut self, node: &dyn Describe, depth: usize) -> Result<SafeValue, AccessError> {
        self.clone_shape(node.shape(), depth)
    }

    fn clone_shape(&mut self, shape: Shape<'_>, depth: usize) -> Result<SafeValue, AccessError> {
        match shape {
            Shape::Null => Ok(SafeValue::Scalar(String::new())),
            Shape::Scalar(scalar) => Ok(self.clone_scalar(&scalar)),
            Shape::Mapping(mapping) => Ok(self.within(
                Identity::of_mapping(mapping),
                mapping.type_label(),
                depth,
                |this| this.clone_mapping(mapping, depth),
            )),
            Shape::Sequence(sequence) => Ok(self.within(
                Identity::of_sequence(sequence),
                sequence.type_label(),
                depth,
                |this| this.clone_sequence(sequence, depth),
            )),
            Shape::Record(record) => Ok(self.within(
                Identity::of_record(record),
                record.type_label(),
                depth,
                |this| this.clone_record(record, depth),
            )),
            Shape::Guarded(guarded) => self.clone_guarded(guarded, depth, 0),
        }
    }

    /// Runs `capture` with `id` on the path, unless it is cyclic or too deep.
    fn within<F>(&mut self, id: Identity, label: &str, depth: usize, capture: F) -> SafeValue
    where
        F: FnOnce(&mut Self) -> SafeValue,
    {
        if self.ancestors.contains(&id) {
            trace!(self.logger, "cyclic reference"; "type" => label, "depth" => depth);
            return SafeValue::Sentinel(Sentinel::CyclicRef);
        }
        if depth >= self.options.max_depth() {
            trace!(self.logger, "maximum depth reached"; "type" => label, "depth" => depth);
            return SafeValue::Sentinel(Sentinel::MaxDepth);
        }
        self.ancestors.push(id);
        let value = capture(self);
        self.ancestors.pop();
        value
    }

    /// A cell adds no nesting level, but it is on the path while entered so
    /// a cycle through it is caught before it is locked a second time.
    ///
    /// `hops` counts cells entered directly inside one another. A run of
    /// cells longer than `max_depth` ends in `[MaxDepth]`.
    fn clone_guarded(
        &mut self,
        guarded: &dyn Guarded,
        depth: usize,
        hops: usize,
    ) -> Result<SafeValue, AccessError> {
        let id = Identity::of_guarded(guarded);
        if self.ancestors.contains(&id) {
            trace!(self.logger, "cyclic reference"; "type" => guarded.type_label(), "depth" => depth);
            return Ok(SafeValue::Sentinel(Sentinel::CyclicRef));
        }
        if hops >= self.options.max_depth() {
            trace!(self.logger, "maximum cell nesting reached";
                "type" => guarded.type_label(), "depth" => depth);
            return Ok(SafeValue::Sentinel(Sentinel::MaxDepth));
        }
        let guard = guarded.enter()?;
        self.ancestors.push(id);
        let value = match guard.shape() {
            Shape::Guarded(inner) => self.clone_guarded(inner, depth, hops + 1),
            shape => self.clone_shape(shape, depth),
        };
        self.ancestors.pop();
        value
    }

    fn clone_mapping(&mut self, mapping: &dyn Mapping, depth: usize) -> SafeValue {
        let mut entries: Vec<(Cow<'_, str>, &dyn Describe)> = mapping.entries().collect();
        if !mapping.is_ordered() {
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        }

        let mut captured = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Some(matched) = self.redactor.classify_key(&key) {
                trace!(self.logger, "masked sensitive entry"; "key" => %key, "class" => %matched);
                captured.push((key.into_owned(), self.masked()));
                continue;
            }
            match self.clone_node(value, depth + 1) {
                Ok(value) => captured.push((key.into_owned(), value)),
                Err(err) => {
                    debug!(self.logger, "omitted unreadable entry";
                        "key" => %key, "owner" => mapping.type_label(), "error" => %err);
                }
            }
        }
        SafeValue::Mapping(captured)
    }

    fn clone_sequence(&mut self, sequence: &dyn Sequence, depth: usize) -> SafeValue {
        let limit = self.options.sequence_limit();
        let mut items = sequence.items();
        let mut captured = Vec::new();
        for (index, item) in items.by_ref().take(limit).enumerate() {
            match self.clone_node(item, depth + 1) {
                Ok(value) => captured.push(value),
                Err(err) => {
                    debug!(self.logger, "omitted unreadable item";
                        "index" => index, "owner" => sequence.type_label(), "error" => %err);
                }
            }
        }
        if items.next().is_some() {
            debug!(self.logger, "sequence truncated";
                "limit" => limit, "owner" => sequence.type_label());
            captured.push(SafeValue::Sentinel(Sentinel::Truncated));
        }
        SafeValue::Sequence(captured)
    }

    fn clone_record(&mut self, record: &dyn Record, depth: usize) -> SafeValue {
        let names = record.members();
        let mut captured = Vec::with_capacity(names.len());
        for name in names {
            if record.is_redacted(&name) || self.redactor.is_sensitive_key(&name) {
                trace!(self.logger, "masked sensitive member"; "member" => %name);
                captured.push((name.into_owned(), self.masked()));
                continue;
            }
            let member = match record.member(&name) {
                Ok(member) => member,
                Err(err) => {
                    debug!(self.logger, "omitted unreadable member";
                        "member" => %name, "owner" => record.type_label(), "error" => %err);
                    continue;
                }
            };
            match self.clone_node(&*member, depth + 1) {
                Ok(value) => captured.push((name.into_owned(), value)),
                Err(err) => {
                    debug!(self.logger, "omitted unreadable member";
                        "member" => %name, "owner" => record.type_label(), "error" => %err);
                }
            }
        }
        SafeValue::Mapping(captured)
    }

    fn clone_scalar(&self, scalar: &Scalar<'_>) -> SafeValue {
        let text = normalize(scalar);
        SafeValue::Scalar(self.redactor.mask_tokens(&text).into_owned())
    }

    fn masked(&self) -> SafeValue {
        SafeValue::Scalar(self.redactor.mask_value().to_owned())
    }
}
