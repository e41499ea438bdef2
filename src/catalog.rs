//! Workout groups and their exercise templates

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 15;

/// Exercise with its target sets and reps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

impl ExerciseTemplate {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
        }
    }
}

/// Named category of exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub name: String,
    pub exercises: Vec<ExerciseTemplate>,
}

impl Group {
    pub fn exercise(&self, name: &str) -> Option<&ExerciseTemplate> {
        self.exercises.iter().find(|e| e.name == name)
    }

    pub fn exercise_names(&self) -> Vec<&str> {
        self.exercises.iter().map(|e| e.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    IncreaseSets,
    DecreaseSets,
    IncreaseReps,
    DecreaseReps,
}

/// Ordered collection of workout groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<Group>,
}

impl Default for Catalog {
    fn default() -> Self {
        let group = |key: &str, name: &str, exercises: &[&str]| Group {
            key: key.to_string(),
            name: name.to_string(),
            exercises: exercises.iter().map(|e| ExerciseTemplate::new(e)).collect(),
        };

        Self {
            groups: vec![
                group("cardio", "Cardio", &["Running", "Cycling", "Swimming"]),
                group("strength", "Strength", &["Squats", "Bench Press", "Deadlifts"]),
                group("flexibility", "Flexibility", &["Yoga", "Stretching", "Pilates"]),
            ],
        }
    }
}

/// Derive a group key from its display name ("Upper Body" -> "upper_body")
pub fn group_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn clean_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("name must not be empty");
    }
    Ok(name)
}

impl Catalog {
    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    fn group_mut(&mut self, key: &str) -> Result<&mut Group> {
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(group) => Ok(group),
            None => bail!("unknown workout group '{}'", key),
        }
    }

    fn exercise_mut(&mut self, group: &str, exercise: &str) -> Result<&mut ExerciseTemplate> {
        let group = self.group_mut(group)?;
        let key = group.key.clone();
        match group.exercises.iter_mut().find(|e| e.name == exercise) {
            Some(template) => Ok(template),
            None => bail!("unknown exercise '{}' in group '{}'", exercise, key),
        }
    }

    /// Add a group and return its key
    pub fn add_group(&mut self, name: &str) -> Result<String> {
        let name = clean_name(name)?;
        let key = group_key(name);
        if self.group(&key).is_some() {
            bail!("workout group '{}' already exists", key);
        }

        self.groups.push(Group {
            key: key.clone(),
            name: name.to_string(),
            exercises: Vec::new(),
        });
        Ok(key)
    }

    /// Change the display name; the key stays stable so history still matches
    pub fn rename_group(&mut self, key: &str, name: &str) -> Result<()> {
        let name = clean_name(name)?;
        self.group_mut(key)?.name = name.to_string();
        Ok(())
    }

    pub fn delete_group(&mut self, key: &str) -> Result<Group> {
        match self.groups.iter().position(|g| g.key == key) {
            Some(index) => Ok(self.groups.remove(index)),
            None => bail!("unknown workout group '{}'", key),
        }
    }

    pub fn add_exercise(&mut self, group: &str, name: &str) -> Result<()> {
        let name = clean_name(name)?;
        let group = self.group_mut(group)?;
        if group.exercise(name).is_some() {
            bail!("exercise '{}' already exists in group '{}'", name, group.key);
        }
        group.exercises.push(ExerciseTemplate::new(name));
        Ok(())
    }

    pub fn rename_exercise(&mut self, group: &str, exercise: &str, name: &str) -> Result<()> {
        let name = clean_name(name)?.to_string();
        if name != exercise && self.group(group).and_then(|g| g.exercise(&name)).is_some() {
            bail!("exercise '{}' already exists in group '{}'", name, group);
        }
        self.exercise_mut(group, exercise)?.name = name;
        Ok(())
    }

    pub fn delete_exercise(&mut self, group: &str, exercise: &str) -> Result<ExerciseTemplate> {
        let group = self.group_mut(group)?;
        match group.exercises.iter().position(|e| e.name == exercise) {
            Some(index) => Ok(group.exercises.remove(index)),
            None => bail!("unknown exercise '{}' in group '{}'", exercise, group.key),
        }
    }

    /// Step the target sets or reps by one; decreases stop at 1
    pub fn adjust_exercise(
        &mut self,
        group: &str,
        exercise: &str,
        adjustment: Adjustment,
    ) -> Result<&ExerciseTemplate> {
        let template = self.exercise_mut(group, exercise)?;
        match adjustment {
            Adjustment::IncreaseSets => template.sets += 1,
            Adjustment::DecreaseSets => template.sets = template.sets.saturating_sub(1).max(1),
            Adjustment::IncreaseReps => template.reps += 1,
            Adjustment::DecreaseReps => template.reps = template.reps.saturating_sub(1).max(1),
        }
        Ok(&*template)
    }
}
