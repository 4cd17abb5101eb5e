//! Randomized invariants that must hold for every discipline, issue width
//! and renaming setting.

use proptest::prelude::*;

use pipesim_core::common::reg::ArchReg;
use pipesim_core::config::{Config, Discipline};
use pipesim_core::engine::Engine;
use pipesim_core::isa::instruction::{Instruction, Operator};

fn any_operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Store),
        Just(Operator::Load),
    ]
}

fn any_instruction() -> impl Strategy<Value = Instruction> {
    (0u8..8, any_operator(), 0u8..8, 0u8..8).prop_map(|(dest, op, lhs, rhs)| {
        if op.reads_operands() {
            Instruction::arithmetic(ArchReg(dest), ArchReg(lhs), op, ArchReg(rhs))
        } else {
            Instruction::memory(ArchReg(dest), op)
        }
    })
}

fn any_program() -> impl Strategy<Value = Vec<Instruction>> {
    prop::collection::vec(any_instruction(), 0..12)
}

fn any_config() -> impl Strategy<Value = Config> {
    (
        prop_oneof![
            Just(Discipline::SingleIssue),
            Just(Discipline::SuperscalarInOrder),
            Just(Discipline::SuperscalarOutOfOrder),
        ],
        1usize..5,
        any::<bool>(),
    )
        .prop_map(|(discipline, issue_slots, register_renaming)| Config {
            discipline,
            issue_slots,
            register_renaming,
            ..Config::default()
        })
}

proptest! {
    /// Every instruction issues exactly once and retires exactly once.
    #[test]
    fn conservation(program in any_program(), cfg in any_config()) {
        let count = program.len();
        let mut engine = Engine::new(program, &cfg).unwrap();
        let full = engine.run().unwrap();

        prop_assert_eq!(full.issued_count(), count);
        prop_assert_eq!(full.retired_count(), count);
    }

    /// An instruction never retires before its latency has elapsed.
    #[test]
    fn latency_is_respected(program in any_program(), cfg in any_config()) {
        let latencies: Vec<u64> = program.iter().map(Instruction::latency).collect();
        let mut engine = Engine::new(program, &cfg).unwrap();
        let full = engine.run().unwrap();

        for (i, latency) in latencies.iter().enumerate() {
            let index = i + 1;
            let issued = full.issue_cycle(index).unwrap();
            let retired = full.retire_cycle(index).unwrap();
            prop_assert!(retired >= issued + latency);
        }
    }

    /// With a single in-flight instruction nothing can block retirement, so
    /// it lands exactly when the latency elapses.
    #[test]
    fn single_issue_retires_on_the_deadline(program in any_program()) {
        let cfg = Config { discipline: Discipline::SingleIssue, ..Config::default() };
        let latencies: Vec<u64> = program.iter().map(Instruction::latency).collect();
        let mut engine = Engine::new(program, &cfg).unwrap();
        let full = engine.run().unwrap();

        for (i, latency) in latencies.iter().enumerate() {
            let index = i + 1;
            let issued = full.issue_cycle(index).unwrap();
            prop_assert_eq!(full.retire_cycle(index), Some(issued + latency));
        }
    }

    /// In-order disciplines retire in program order.
    #[test]
    fn in_order_retirement_is_monotonic(
        program in any_program(),
        discipline in prop_oneof![
            Just(Discipline::SingleIssue),
            Just(Discipline::SuperscalarInOrder),
        ],
        issue_slots in 1usize..5,
        register_renaming in any::<bool>(),
    ) {
        let cfg = Config {
            discipline,
            issue_slots,
            register_renaming,
            ..Config::default()
        };
        let mut engine = Engine::new(program, &cfg).unwrap();
        let full = engine.run().unwrap();

        let order: Vec<usize> = full
            .retirement_events()
            .into_iter()
            .map(|(_, index)| index)
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    /// The engine is deterministic: the same program and configuration
    /// always produce the same trace.
    #[test]
    fn runs_are_deterministic(program in any_program(), cfg in any_config()) {
        let mut first = Engine::new(program.clone(), &cfg).unwrap();
        let mut second = Engine::new(program, &cfg).unwrap();

        let a = first.run().unwrap().to_json().unwrap();
        let b = second.run().unwrap().to_json().unwrap();
        prop_assert_eq!(a, b);
    }
}
