//! Player-side members: trainees and debuted idols.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Leader,
    Vocal,
    Dance,
    Rap,
    Visual,
    Center,
    Maknae,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Vocal,
    Dance,
    Rap,
    Visual,
    Charisma,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdolStats {
    pub vocal: u8,
    pub dance: u8,
    pub rap: u8,
    pub visual: u8,
    pub charisma: u8,
}

impl IdolStats {
    pub fn average(&self) -> f64 {
        let sum = u32::from(self.vocal)
            + u32::from(self.dance)
            + u32::from(self.rap)
            + u32::from(self.visual)
            + u32::from(self.charisma);
        f64::from(sum) / 5.0
    }

    pub fn get_mut(&mut self, skill: Skill) -> &mut u8 {
        match skill {
            Skill::Vocal => &mut self.vocal,
            Skill::Dance => &mut self.dance,
            Skill::Rap => &mut self.rap,
            Skill::Visual => &mut self.visual,
            Skill::Charisma => &mut self.charisma,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Idol {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub stats: IdolStats,
    /// 0-100.
    pub energy: u8,
    /// 0-100.
    pub stress: u8,
    pub positions: Vec<Position>,
}

impl Idol {
    /// Weekly rest: energy up, stress down, both kept within 0-100.
    pub fn rest(&mut self, energy_recovery: u8, stress_relief: u8) {
        self.energy = self.energy.saturating_add(energy_recovery).min(100);
        self.stress = self.stress.saturating_sub(stress_relief);
    }

    pub fn drain(&mut self, energy: u8) {
        self.energy = self.energy.saturating_sub(energy);
    }
}

/// Mean of each idol's average stat; 0 for an empty lineup.
pub fn lineup_skill(idols: &[Idol]) -> f64 {
    if idols.is_empty() {
        return 0.0;
    }
    idols.iter().map(|i| i.stats.average()).sum::<f64>() / idols.len() as f64
}

/// Mean energy across the lineup; 0 for an empty lineup.
pub fn lineup_energy(idols: &[Idol]) -> f64 {
    if idols.is_empty() {
        return 0.0;
    }
    idols.iter().map(|i| f64::from(i.energy)).sum::<f64>() / idols.len() as f64
}
