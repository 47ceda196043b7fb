use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{FilterKind, ParamValue};
use crate::error::{LumenError, Result};
use crate::pipeline::config::FilterConfig;

/// Stable handle to one filter in a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One active filter: a kind plus the parameters the user has overridden.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterInstance {
    pub id: InstanceId,
    pub kind: FilterKind,
    pub overrides: BTreeMap<String, ParamValue>,
}

impl FilterInstance {
    /// Override if present, else the catalog default for this kind.
    pub fn effective(&self, name: &str) -> Option<ParamValue> {
        self.overrides
            .get(name)
            .cloned()
            .or_else(|| self.kind.descriptor().default_value(name))
    }

    /// Every schema parameter with its effective value, plus any extra overrides.
    pub fn effective_params(&self) -> BTreeMap<String, ParamValue> {
        let mut params: BTreeMap<String, ParamValue> = self
            .kind
            .descriptor()
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.default.to_value()))
            .collect();
        for (name, value) in &self.overrides {
            params.insert(name.clone(), value.clone());
        }
        params
    }
}

/// Ordered, capacity-bounded list of filters. Order is application order.
#[derive(Clone, Debug)]
pub struct FilterChain {
    max_filters: usize,
    instances: Vec<FilterInstance>,
    next_id: u64,
}

impl FilterChain {
    pub fn new(max_filters: usize) -> Self {
        Self {
            max_filters,
            instances: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a filter seeded with the catalog defaults for `kind`.
    pub fn add(&mut self, kind: FilterKind) -> Result<InstanceId> {
        if self.instances.len() >= self.max_filters {
            return Err(LumenError::CapacityExceeded {
                max: self.max_filters,
            });
        }
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.instances.push(FilterInstance {
            id,
            kind,
            overrides: BTreeMap::new(),
        });
        debug!(%id, %kind, len = self.instances.len(), "Filter added");
        Ok(id)
    }

    /// Remove a filter and its overrides. Unknown ids are ignored.
    pub fn remove(&mut self, id: InstanceId) -> Option<FilterInstance> {
        let pos = self.position(id)?;
        Some(self.instances.remove(pos))
    }

    /// Create or overwrite one override. Values are not range-checked.
    ///
    /// Returns `false` when `id` is not in the chain.
    pub fn set_parameter(
        &mut self,
        id: InstanceId,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> bool {
        match self.instances.iter_mut().find(|f| f.id == id) {
            Some(instance) => {
                instance.overrides.insert(name.into(), value.into());
                true
            }
            None => false,
        }
    }

    /// Move a filter to `new_index` (clamped to the last slot).
    pub fn move_to(&mut self, id: InstanceId, new_index: usize) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let instance = self.instances.remove(pos);
        let index = new_index.min(self.instances.len());
        self.instances.insert(index, instance);
        true
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Filters in application order.
    pub fn order(&self) -> &[FilterInstance] {
        &self.instances
    }

    pub fn get(&self, id: InstanceId) -> Option<&FilterInstance> {
        self.instances.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn max_filters(&self) -> usize {
        self.max_filters
    }

    /// Serializable form. Every override is kept, including ignored ones.
    pub fn to_config(&self) -> Vec<FilterConfig> {
        self.instances
            .iter()
            .map(|f| FilterConfig {
                kind: f.kind,
                params: f.overrides.clone(),
            })
            .collect()
    }

    /// Rebuild a chain from saved filters, rejecting configs over capacity.
    pub fn from_config(max_filters: usize, filters: &[FilterConfig]) -> Result<Self> {
        let mut chain = Self::new(max_filters);
        for fc in filters {
            let id = chain.add(fc.kind)?;
            for (name, value) in &fc.params {
                chain.set_parameter(id, name.clone(), value.clone());
            }
        }
        Ok(chain)
    }

    fn position(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|f| f.id == id)
    }
}
