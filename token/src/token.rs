//! Fungible balances with mint and burn.

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{PoisonError, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};

use polyscale_data_structures::{
    AccessPolicy, InvalidInput, LedgerError, LedgerResult, Operation, Tokens,
};
use polyscale_storage::{
    error::{StorageError, StorageErrorKind},
    storage::{from_bytes, get_t, prefixed_key, to_bytes},
    Storage, WriteBatch,
};

/// Storage key prefix of the balances table
pub const BALANCE_PREFIX: &[u8] = b"balance-";
/// Storage key of the total supply
pub const SUPPLY_KEY: &[u8] = b"supply";

#[derive(Debug)]
struct Balances<K> {
    // Every identity that was ever credited, including those burnt down to zero
    by_holder: BTreeMap<K, Tokens>,
    // Always equal to the sum of `by_holder`
    total_supply: Tokens,
}

/// Reward token ledger
///
/// Keeps the token balance of every identity `K` together with the total supply.
/// Balances and supply are updated under the same write lock, so the supply always
/// equals the sum of all balances and two concurrent burns can never spend the same
/// tokens twice.
#[derive(Debug)]
pub struct RewardToken<K>
where
    K: Ord,
{
    state: RwLock<Balances<K>>,
    policy: AccessPolicy<K>,
}

impl<K> Default for RewardToken<K>
where
    K: Clone + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RewardToken<K>
where
    K: Clone + Debug + Ord,
{
    /// Builds a token with no supply that any caller can mint and burn
    pub fn new() -> Self {
        Self::with_policy(AccessPolicy::Open)
    }

    /// Builds a token with no supply that only callers allowed by `policy` can mint and burn
    pub fn with_policy(policy: AccessPolicy<K>) -> Self {
        Self {
            state: RwLock::new(Balances {
                by_holder: BTreeMap::new(),
                total_supply: Tokens::zero(),
            }),
            policy,
        }
    }

    /// Create `amount` new tokens in the account of `to`, returning its new balance
    pub fn mint(&self, caller: &K, to: &K, amount: Tokens) -> LedgerResult<Tokens> {
        let result = self.credit(caller, to, amount, Operation::Mint);

        match &result {
            Ok(balance) => log::debug!("Minted {} to {:?}, balance {}", amount, to, balance),
            Err(e) => log::warn!("Rejected mint of {} to {:?}: {}", amount, to, e),
        }

        result
    }

    /// Pay out `amount` new tokens to `to` as an incentive, returning its new balance.
    ///
    /// Same accounting as `mint`; kept separate so that incentive payouts are
    /// distinguishable from arbitrary minting in permissions and logs.
    pub fn reward(&self, caller: &K, to: &K, amount: Tokens) -> LedgerResult<Tokens> {
        let result = self.credit(caller, to, amount, Operation::Reward);

        match &result {
            Ok(balance) => log::debug!("Rewarded {} to {:?}, balance {}", amount, to, balance),
            Err(e) => log::warn!("Rejected reward of {} to {:?}: {}", amount, to, e),
        }

        result
    }

    /// Destroy `amount` tokens from the account of `from`, returning its new balance.
    ///
    /// Fails without burning anything if the balance is lower than `amount`.
    pub fn burn(&self, caller: &K, from: &K, amount: Tokens) -> LedgerResult<Tokens> {
        let result = self.debit(caller, from, amount);

        match &result {
            Ok(balance) => log::debug!("Burnt {} from {:?}, balance {}", amount, from, balance),
            Err(e) => log::warn!("Rejected burn of {} from {:?}: {}", amount, from, e),
        }

        result
    }

    /// Balance of `who`, zero for identities that never received tokens
    pub fn balance_of(&self, who: &K) -> Tokens {
        self.read_state(|state| state.by_holder.get(who).copied().unwrap_or_default())
    }

    /// Sum of all balances
    pub fn total_supply(&self) -> Tokens {
        self.read_state(|state| state.total_supply)
    }

    /// Number of identities that ever received tokens
    pub fn holders(&self) -> usize {
        self.read_state(|state| state.by_holder.len())
    }

    /// Copy of all the balances, ordered by identity
    pub fn balances(&self) -> Vec<(K, Tokens)> {
        self.read_state(|state| {
            state
                .by_holder
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect()
        })
    }

    fn read_state<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Balances<K>) -> T,
    {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn credit(
        &self,
        caller: &K,
        to: &K,
        amount: Tokens,
        operation: Operation,
    ) -> LedgerResult<Tokens> {
        self.policy.check(caller, operation)?;
        if amount.is_zero() {
            return Err(InvalidInput::ZeroAmount.into());
        }

        let mut state = self.state.write()?;
        let overflow = |current: Tokens| LedgerError::Overflow {
            current: current.base_units(),
            requested: amount.base_units(),
        };
        // Compute both sides before touching the state, so that a failure leaves it intact
        let balance = state.by_holder.get(to).copied().unwrap_or_default();
        let new_balance = balance.checked_add(amount).ok_or_else(|| overflow(balance))?;
        let new_supply = state
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| overflow(state.total_supply))?;

        state.by_holder.insert(to.clone(), new_balance);
        state.total_supply = new_supply;

        Ok(new_balance)
    }

    fn debit(&self, caller: &K, from: &K, amount: Tokens) -> LedgerResult<Tokens> {
        self.policy.check(caller, Operation::Burn)?;
        if amount.is_zero() {
            return Err(InvalidInput::ZeroAmount.into());
        }

        let mut state = self.state.write()?;
        let balance = state.by_holder.get(from).copied().unwrap_or_default();
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                requested: amount,
                available: balance,
            })?;
        let new_supply = state
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow {
                current: state.total_supply.base_units(),
                requested: amount.base_units(),
            })?;

        // `from` is necessarily a holder here, since its balance covered a non-zero amount
        state.by_holder.insert(from.clone(), new_balance);
        state.total_supply = new_supply;

        Ok(new_balance)
    }
}

impl<K> RewardToken<K>
where
    K: Clone + Debug + Ord + Serialize + DeserializeOwned,
{
    /// Write every balance and the total supply into `storage`, in a single atomic batch
    pub fn persist(&self, storage: &dyn Storage) -> polyscale_storage::Result<()> {
        // Balances and supply must come from the same snapshot
        let (balances, total_supply) = self.read_state(|state| {
            (
                state
                    .by_holder
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect::<Vec<_>>(),
                state.total_supply,
            )
        });

        let mut batch = WriteBatch::default();
        for (who, balance) in &balances {
            batch.put_t(prefixed_key(BALANCE_PREFIX, &to_bytes(who)?), balance)?;
        }
        batch.put_t(SUPPLY_KEY.to_vec(), &total_supply)?;
        storage.write(batch)?;
        log::debug!(
            "Persisted {} balances, total supply {}",
            balances.len(),
            total_supply
        );

        Ok(())
    }

    /// Rebuild a token ledger from the balances previously written by `persist`.
    ///
    /// Fails if the stored supply does not match the sum of the stored balances.
    pub fn restore(
        storage: &dyn Storage,
        policy: AccessPolicy<K>,
    ) -> polyscale_storage::Result<Self> {
        let mut by_holder = BTreeMap::new();
        let mut sum = Tokens::zero();
        for (key, value) in storage.prefix_iterator(BALANCE_PREFIX)? {
            let who: K = from_bytes(&key[BALANCE_PREFIX.len()..])?;
            let balance: Tokens = from_bytes(&value)?;
            sum = sum.checked_add(balance).ok_or_else(|| {
                StorageError::new(
                    StorageErrorKind::Corrupted,
                    "balances".to_string(),
                    "sum of balances overflows".to_string(),
                )
            })?;
            by_holder.insert(who, balance);
        }

        let total_supply: Tokens = get_t(storage, SUPPLY_KEY)?.unwrap_or_default();
        if total_supply != sum {
            return Err(StorageError::new(
                StorageErrorKind::Corrupted,
                "supply".to_string(),
                format!(
                    "stored total supply {} differs from the sum of balances {}",
                    total_supply, sum
                ),
            )
            .into());
        }
        log::debug!(
            "Restored {} balances, total supply {}",
            by_holder.len(),
            total_supply
        );

        Ok(Self {
            state: RwLock::new(Balances {
                by_holder,
                total_supply,
            }),
            policy,
        })
    }
}
