use gatelife_data::{Instruction, NUM_REGISTERS};
use rand::Rng;

fn register<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..NUM_REGISTERS as u8)
}

/// Uniformly random opcode with random operands.
pub fn random_instruction<R: Rng + ?Sized>(rng: &mut R) -> Instruction {
    match rng.gen_range(0..Instruction::OPCODES) {
        0 => Instruction::Nop,
        1 => Instruction::Input(register(rng)),
        2 => Instruction::Output(register(rng)),
        3 => Instruction::Not(register(rng)),
        4 => Instruction::Nand(register(rng), register(rng), register(rng)),
        5 => Instruction::And(register(rng), register(rng), register(rng)),
        6 => Instruction::Or(register(rng), register(rng), register(rng)),
        7 => Instruction::Xor(register(rng), register(rng), register(rng)),
        8 => Instruction::Set(register(rng), rng.gen_bool(0.5)),
        9 => Instruction::Copy(register(rng), register(rng)),
        _ => Instruction::SkipIfFalse(register(rng)),
    }
}

pub fn random_program<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<Instruction> {
    (0..length).map(|_| random_instruction(rng)).collect()
}

/// Replaces each site with a fresh random instruction with probability `rate`.
///
/// Returns the number of sites that were redrawn. A redrawn site may come out
/// identical to the original.
pub fn point_mutate<R: Rng + ?Sized>(program: &mut [Instruction], rate: f64, rng: &mut R) -> usize {
    let mut hits = 0;
    for site in program.iter_mut() {
        if rng.gen::<f64>() < rate {
            *site = random_instruction(rng);
            hits += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_zero_rate_is_identity() {
        let mut rng = create_rng(9);
        let mut program = random_program(50, &mut rng);
        let before = program.clone();
        assert_eq!(point_mutate(&mut program, 0.0, &mut rng), 0);
        assert_eq!(program, before);
    }

    #[test]
    fn test_full_rate_touches_every_site() {
        let mut rng = create_rng(9);
        let mut program = random_program(20, &mut rng);
        assert_eq!(point_mutate(&mut program, 1.0, &mut rng), 20);
    }

    #[test]
    fn test_operands_stay_in_range() {
        let mut rng = create_rng(4);
        for inst in random_program(500, &mut rng) {
            if let Instruction::Nand(a, b, d) = inst {
                assert!((a as usize) < NUM_REGISTERS);
                assert!((b as usize) < NUM_REGISTERS);
                assert!((d as usize) < NUM_REGISTERS);
            }
        }
    }
}
