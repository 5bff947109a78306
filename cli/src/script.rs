//! Operation scripts: a funding table plus an ordered list of ledger calls.

use serde::{Deserialize, Serialize};
use stake_ledger::{CallContext, LedgerConfig, LedgerSnapshot, NewStake, Stake, StakingLedger};
use stake_nullables::{NullClock, NullCustody};
use stake_types::{Amount, Identity, Timestamp};
use std::collections::BTreeMap;

fn default_start() -> u64 {
    1_700_000_000
}

/// A replayable script.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Initial free balances.
    #[serde(default)]
    pub funds: BTreeMap<String, Amount>,
    /// Clock reading before the first operation.
    #[serde(default = "default_start")]
    pub start_time: u64,
    pub ops: Vec<ScriptOp>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    CreateStake {
        caller: String,
        #[serde(default)]
        attached: Amount,
        staker: String,
        arbiters: Vec<String>,
        stake_amount: Amount,
        arbiter_fee: Amount,
        griefing_fee: Amount,
        deadline: u64,
        #[serde(default)]
        metadata: String,
    },
    OpenClaim {
        caller: String,
        #[serde(default)]
        attached: Amount,
        stake_id: u64,
        claim_amount: Amount,
        #[serde(default)]
        metadata: String,
    },
    RuleOnClaim {
        caller: String,
        stake_id: u64,
        claim_id: u64,
        arbiter_index: usize,
        correct: bool,
        #[serde(default)]
        metadata: String,
    },
    GetStake {
        stake_id: u64,
    },
    StakeCount,
    Advance {
        secs: u64,
    },
}

impl ScriptOp {
    fn name(&self) -> &'static str {
        match self {
            Self::CreateStake { .. } => "create_stake",
            Self::OpenClaim { .. } => "open_claim",
            Self::RuleOnClaim { .. } => "rule_on_claim",
            Self::GetStake { .. } => "get_stake",
            Self::StakeCount => "stake_count",
            Self::Advance { .. } => "advance",
        }
    }
}

/// One line of the report.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub stake_count: u64,
    pub stakes: Vec<Stake>,
    pub balances: BTreeMap<Identity, Amount>,
    pub held: Amount,
    pub balanced: bool,
}

pub struct Outcome {
    pub report: Report,
    pub snapshot: LedgerSnapshot,
}

/// Replay `script` against a fresh in-memory ledger.
///
/// Rejected operations are recorded in the report and do not stop the run.
pub fn run(script: &Script, config: LedgerConfig) -> anyhow::Result<Outcome> {
    let mut custody = NullCustody::new();
    for (account, amount) in &script.funds {
        custody.fund(&Identity::parse(account)?, *amount)?;
    }
    let clock = NullClock::new(script.start_time);
    let mut ledger = StakingLedger::with_config(custody, config);

    let mut steps = Vec::with_capacity(script.ops.len());
    for (index, op) in script.ops.iter().enumerate() {
        let result = step(&mut ledger, &clock, op);
        steps.push(match result {
            Ok(value) => StepReport {
                index,
                op: op.name(),
                ok: true,
                result: value,
                error: None,
            },
            Err(e) => StepReport {
                index,
                op: op.name(),
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        });
    }

    let snapshot = ledger.snapshot(clock.now())?;
    let balanced = ledger.is_balanced();
    tracing::info!(
        ops = steps.len(),
        rejected = steps.iter().filter(|s| !s.ok).count(),
        balanced,
        "script replayed"
    );
    let report = Report {
        steps,
        stake_count: ledger.stake_count(),
        stakes: ledger.stakes().cloned().collect(),
        balances: ledger.custody().balances().clone(),
        held: ledger.custody().held(),
        balanced,
    };
    Ok(Outcome { report, snapshot })
}

fn step(
    ledger: &mut StakingLedger<NullCustody>,
    clock: &NullClock,
    op: &ScriptOp,
) -> anyhow::Result<Option<serde_json::Value>> {
    let value = match op {
        ScriptOp::CreateStake {
            caller,
            attached,
            staker,
            arbiters,
            stake_amount,
            arbiter_fee,
            griefing_fee,
            deadline,
            metadata,
        } => {
            let terms = NewStake {
                staker: Identity::new(staker.as_str()),
                arbiters: arbiters.iter().map(|a| Identity::new(a.as_str())).collect(),
                stake_amount: *stake_amount,
                arbiter_fee: *arbiter_fee,
                griefing_fee: *griefing_fee,
                deadline: Timestamp::new(*deadline),
                metadata: metadata.as_bytes().to_vec(),
            };
            let ctx = CallContext::new(caller.as_str(), *attached, clock.now());
            let id = ledger.create_stake(&ctx, terms)?;
            Some(serde_json::json!({ "stake_id": id }))
        }
        ScriptOp::OpenClaim {
            caller,
            attached,
            stake_id,
            claim_amount,
            metadata,
        } => {
            let ctx = CallContext::new(caller.as_str(), *attached, clock.now());
            let id = ledger.open_claim(&ctx, *stake_id, *claim_amount, metadata.as_bytes().to_vec())?;
            Some(serde_json::json!({ "claim_id": id }))
        }
        ScriptOp::RuleOnClaim {
            caller,
            stake_id,
            claim_id,
            arbiter_index,
            correct,
            metadata,
        } => {
            let ctx = CallContext::call(caller.as_str(), clock.now());
            let settlement = ledger.rule_on_claim(
                &ctx,
                *stake_id,
                *claim_id,
                *arbiter_index,
                *correct,
                metadata.as_bytes().to_vec(),
            )?;
            Some(serde_json::to_value(settlement)?)
        }
        ScriptOp::GetStake { stake_id } => Some(serde_json::to_value(ledger.get_stake(*stake_id)?)?),
        ScriptOp::StakeCount => Some(serde_json::json!(ledger.stake_count())),
        ScriptOp::Advance { secs } => {
            clock.advance(*secs);
            None
        }
    };
    Ok(value)
}
