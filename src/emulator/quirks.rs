use std::str::FromStr;

/// The hardware variant to emulate, chosen once at machine construction.
///
/// The variant fixes the framebuffer dimensions and the [`Quirks`] that
/// steer the handful of opcodes whose behavior drifted between the original
/// COSMAC VIP interpreter and the HP48 ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysType {
    Chip8,
    Chip48,
    SuperChip10,
}

impl FromStr for SysType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(SysType::Chip8),
            "chip48" | "chip-48" => Ok(SysType::Chip48),
            "superchip" | "superchip10" | "schip" => Ok(SysType::SuperChip10),
            other => Err(format!(
                "unknown target '{}' (expected chip8, chip48 or superchip)",
                other
            )),
        }
    }
}

/// Per-variant behavior switches, decided once so the opcode handlers never
/// compare against [`SysType`] themselves. Adding another variant is a data
/// change here, not a code change in the CPU.
#[derive(Debug, Clone, Copy)]
pub struct Quirks {
    /// 8XY1/8XY2/8XY3 leave VF zeroed afterwards.
    pub logic_ops_reset_vf: bool,
    /// 8XY6/8XYE copy VY into VX before shifting.
    pub shift_copies_y: bool,
    /// FX55/FX65 leave I at `I + X + 1`; otherwise at `I + X`.
    pub save_load_increments_i_by_x_plus_one: bool,
    /// BNNN jumps to `VX + NN` instead of `V0 + NNN`.
    pub jump_offset_uses_vx: bool,
    /// 00FE/00FF toggle the high-resolution display mode.
    pub has_hires: bool,
    /// DXY0 draws a 16x16 sprite instead of zero rows.
    pub wide_sprites: bool,
    /// Sprite pixels past the screen edge wrap around instead of clipping.
    /// All shipped variants clip; kept as data for wrapping interpreters.
    pub wrap_sprite_pixels: bool,
}

impl Quirks {
    pub fn for_target(target: SysType) -> Quirks {
        let hp48_family = matches!(target, SysType::Chip48 | SysType::SuperChip10);
        Quirks {
            logic_ops_reset_vf: true,
            shift_copies_y: target == SysType::Chip8,
            save_load_increments_i_by_x_plus_one: !hp48_family,
            jump_offset_uses_vx: hp48_family,
            has_hires: target == SysType::SuperChip10,
            wide_sprites: target == SysType::SuperChip10,
            wrap_sprite_pixels: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SysType::Chip8, true, true, false; "chip8")]
    #[test_case(SysType::Chip48, false, false, true; "chip48")]
    #[test_case(SysType::SuperChip10, false, false, true; "superchip10")]
    fn quirk_table(target: SysType, copies_y: bool, bumps_past_x: bool, indexed_jump: bool) {
        let quirks = Quirks::for_target(target);
        assert_eq!(quirks.shift_copies_y, copies_y);
        assert_eq!(quirks.save_load_increments_i_by_x_plus_one, bumps_past_x);
        assert_eq!(quirks.jump_offset_uses_vx, indexed_jump);
        assert!(quirks.logic_ops_reset_vf);
    }

    #[test]
    fn only_superchip_has_hires_and_wide_sprites() {
        assert!(!Quirks::for_target(SysType::Chip8).has_hires);
        assert!(!Quirks::for_target(SysType::Chip48).wide_sprites);
        let schip = Quirks::for_target(SysType::SuperChip10);
        assert!(schip.has_hires && schip.wide_sprites);
    }

    #[test]
    fn parses_target_names() {
        assert_eq!("chip8".parse::<SysType>().unwrap(), SysType::Chip8);
        assert_eq!("CHIP-48".parse::<SysType>().unwrap(), SysType::Chip48);
        assert_eq!("schip".parse::<SysType>().unwrap(), SysType::SuperChip10);
        assert!("chip16".parse::<SysType>().is_err());
    }
}
