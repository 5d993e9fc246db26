//! Billing checkpoint registry
//!
//! Checkpoints are kept ordered by number. The active checkpoint is the
//! highest-numbered one unless a caller asks for another explicitly.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{CheckpointId, Timezone};
use domain_ledger::{ContractConfig, Ledger};
use crate::certificate::{derive_certificate, PaymentCertificate};
use crate::error::SalError;

/// A numbered billing checkpoint (SAL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub id: CheckpointId,
    pub number: u32,
    pub date: NaiveDate,
    pub locked: bool,
}

/// Cumulative net value of the works at a checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointValue {
    pub number: u32,
    pub date: NaiveDate,
    pub total_net: Decimal,
}

/// Ordered set of billing checkpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckpointRegistry {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a registry from stored checkpoints
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCheckpoint` if two checkpoints share an id, or
    /// `SequenceGap` unless the numbers are exactly 1..=n
    pub fn from_checkpoints(mut checkpoints: Vec<Checkpoint>) -> Result<Self, SalError> {
        let mut seen = HashSet::with_capacity(checkpoints.len());
        if let Some(duplicate) = checkpoints.iter().find(|c| !seen.insert(c.id)) {
            return Err(SalError::DuplicateCheckpoint(duplicate.id.to_string()));
        }

        checkpoints.sort_by_key(|c| c.number);
        for (position, checkpoint) in checkpoints.iter().enumerate() {
            let expected = position as u32 + 1;
            if checkpoint.number != expected {
                return Err(SalError::SequenceGap {
                    expected,
                    found: checkpoint.number,
                });
            }
        }
        Ok(Self { checkpoints })
    }

    /// Appends the next checkpoint dated `date`
    pub fn create(&mut self, date: NaiveDate) -> &Checkpoint {
        let number = self.last_number() + 1;
        let checkpoint = Checkpoint {
            id: CheckpointId::new_v7(),
            number,
            date,
            locked: false,
        };
        info!(number, %date, "Checkpoint created");
        self.checkpoints.push(checkpoint);
        &self.checkpoints[self.checkpoints.len() - 1]
    }

    /// Appends the next checkpoint dated today at the site
    pub fn create_today(&mut self, timezone: &Timezone) -> &Checkpoint {
        self.create(timezone.today())
    }

    /// Deletes the last checkpoint
    ///
    /// # Errors
    ///
    /// - `CheckpointNotFound` for an unknown id
    /// - `NotLastCheckpoint` unless it is the highest-numbered checkpoint
    /// - `CheckpointLocked` if it is locked
    pub fn delete(&mut self, id: &CheckpointId) -> Result<Checkpoint, SalError> {
        let checkpoint = self.require(id)?;
        let last = self.last_number();
        if checkpoint.number != last {
            return Err(SalError::NotLastCheckpoint {
                number: checkpoint.number,
                last,
            });
        }
        if checkpoint.locked {
            return Err(SalError::CheckpointLocked(checkpoint.number));
        }

        let removed = self.checkpoints.remove(self.checkpoints.len() - 1);
        info!(number = removed.number, "Checkpoint deleted");
        Ok(removed)
    }

    /// Moves an unlocked checkpoint to another date
    pub fn set_date(&mut self, id: &CheckpointId, date: NaiveDate) -> Result<(), SalError> {
        let checkpoint = self.require_mut(id)?;
        if checkpoint.locked {
            return Err(SalError::CheckpointLocked(checkpoint.number));
        }
        info!(number = checkpoint.number, from = %checkpoint.date, to = %date, "Checkpoint date changed");
        checkpoint.date = date;
        Ok(())
    }

    /// Flips the lock and returns the new state
    pub fn toggle_lock(&mut self, id: &CheckpointId) -> Result<bool, SalError> {
        let checkpoint = self.require_mut(id)?;
        checkpoint.locked = !checkpoint.locked;
        info!(number = checkpoint.number, locked = checkpoint.locked, "Checkpoint lock toggled");
        Ok(checkpoint.locked)
    }

    pub fn get(&self, id: &CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| &c.id == id)
    }

    pub fn by_number(&self, number: u32) -> Option<&Checkpoint> {
        number
            .checked_sub(1)
            .and_then(|position| self.checkpoints.get(position as usize))
    }

    /// The highest-numbered checkpoint
    pub fn active(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// The checkpoint numbered immediately before `id`
    pub fn predecessor(&self, id: &CheckpointId) -> Option<&Checkpoint> {
        let checkpoint = self.get(id)?;
        self.by_number(checkpoint.number.checked_sub(1)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Cumulative net value at every checkpoint, in number order
    ///
    /// Each value is an independent snapshot over the whole ledger up to the
    /// checkpoint date.
    pub fn progression(&self, ledger: &Ledger, config: &ContractConfig) -> Vec<CheckpointValue> {
        self.checkpoints
            .iter()
            .map(|c| CheckpointValue {
                number: c.number,
                date: c.date,
                total_net: ledger.snapshot(c.date, config).total_net,
            })
            .collect()
    }

    /// Payment certificate of one checkpoint
    pub fn certificate(
        &self,
        id: &CheckpointId,
        ledger: &Ledger,
        config: &ContractConfig,
    ) -> Result<PaymentCertificate, SalError> {
        let current = self.require(id)?;
        Ok(derive_certificate(ledger, config, current, self.predecessor(id)))
    }

    /// Payment certificates of every checkpoint, in number order
    pub fn certificates(&self, ledger: &Ledger, config: &ContractConfig) -> Vec<PaymentCertificate> {
        self.checkpoints
            .iter()
            .enumerate()
            .map(|(position, current)| {
                let previous = position.checked_sub(1).map(|p| &self.checkpoints[p]);
                derive_certificate(ledger, config, current, previous)
            })
            .collect()
    }

    fn last_number(&self) -> u32 {
        self.checkpoints.last().map(|c| c.number).unwrap_or(0)
    }

    fn require(&self, id: &CheckpointId) -> Result<&Checkpoint, SalError> {
        self.get(id)
            .ok_or_else(|| SalError::CheckpointNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &CheckpointId) -> Result<&mut Checkpoint, SalError> {
        self.checkpoints
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| SalError::CheckpointNotFound(id.to_string()))
    }
}

impl<'de> Deserialize<'de> for CheckpointRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let checkpoints = Vec::<Checkpoint>::deserialize(deserializer)?;
        CheckpointRegistry::from_checkpoints(checkpoints).map_err(serde::de::Error::custom)
    }
}
