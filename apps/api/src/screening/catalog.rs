//! Role profile catalog — static mapping of role id to required skills and
//! experience keywords. Loaded once at startup, immutable afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Requirements for a single role. A profile with an empty skill or keyword
/// set is a configuration error, never a valid zero score — `validate`
/// rejects it at load time so the matcher can divide safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    #[serde(default)]
    pub role_id: String,
    pub required_skills: BTreeSet<String>,
    pub experience_keywords: BTreeSet<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: BTreeMap<String, RoleProfile>,
}

impl RoleCatalog {
    /// The four reference roles the screening flow supports out of the box.
    pub fn builtin() -> Self {
        let mut roles = BTreeMap::new();
        insert(
            &mut roles,
            "ai_ml_engineer",
            &["python", "pytorch", "tensorflow", "machine learning", "deep learning"],
            &["mlops", "rag", "llm", "prompt engineering"],
            "AI/ML Engineer: builds and ships machine learning systems, from model training to production MLOps.",
        );
        insert(
            &mut roles,
            "full_stack_engineer",
            &["javascript", "react", "node.js", "html", "css", "sql"],
            &["rest api", "graphql", "cloud deployment", "git"],
            "Full Stack Engineer: delivers end-to-end features across web frontends, APIs, and databases.",
        );
        insert(
            &mut roles,
            "frontend_engineer",
            &["javascript", "react", "html", "css", "redux"],
            &["ui/ux", "responsive design", "state management"],
            "Frontend Engineer: owns the user-facing web experience, from design collaboration to state management.",
        );
        insert(
            &mut roles,
            "backend_engineer",
            &["python", "django", "flask", "rest api", "sql"],
            &["database management", "cloud services", "performance optimization"],
            "Backend Engineer: designs and operates the services and data layers behind the product.",
        );
        RoleCatalog { roles }
    }

    /// Loads a catalog from a JSON file mapping role_id to profile.
    pub fn from_json_file(path: &str) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("could not read role catalog '{path}': {e}"))
        })?;
        let mut roles: BTreeMap<String, RoleProfile> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!("role catalog '{path}' is not valid JSON: {e}"))
        })?;
        // The map key is authoritative for the role id.
        for (id, profile) in roles.iter_mut() {
            profile.role_id = id.clone();
        }
        let catalog = RoleCatalog { roles };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Rejects profiles whose skill or keyword sets are empty.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.roles.is_empty() {
            return Err(AppError::Configuration(
                "role catalog contains no roles".to_string(),
            ));
        }
        for (id, profile) in &self.roles {
            if profile.required_skills.is_empty() {
                return Err(AppError::Configuration(format!(
                    "role '{id}' has an empty required_skills set"
                )));
            }
            if profile.experience_keywords.is_empty() {
                return Err(AppError::Configuration(format!(
                    "role '{id}' has an empty experience_keywords set"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, role_id: &str) -> Result<&RoleProfile, AppError> {
        self.roles
            .get(role_id)
            .ok_or_else(|| AppError::Configuration(format!("unknown role '{role_id}'")))
    }

    pub fn profiles(&self) -> impl Iterator<Item = &RoleProfile> {
        self.roles.values()
    }
}

fn insert(
    roles: &mut BTreeMap<String, RoleProfile>,
    role_id: &str,
    skills: &[&str],
    keywords: &[&str],
    description: &str,
) {
    roles.insert(
        role_id.to_string(),
        RoleProfile {
            role_id: role_id.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            description: description.to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_four_roles_and_validates() {
        let catalog = RoleCatalog::builtin();
        assert_eq!(catalog.profiles().count(), 4);
        catalog.validate().unwrap();
    }

    #[test]
    fn test_frontend_role_has_five_required_skills() {
        let catalog = RoleCatalog::builtin();
        let frontend = catalog.get("frontend_engineer").unwrap();
        assert_eq!(frontend.required_skills.len(), 5);
    }

    #[test]
    fn test_unknown_role_is_configuration_error() {
        let catalog = RoleCatalog::builtin();
        match catalog.get("staff_astronaut") {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("staff_astronaut")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_skill_set_rejected_at_validation() {
        let mut roles = BTreeMap::new();
        roles.insert(
            "broken".to_string(),
            RoleProfile {
                role_id: "broken".to_string(),
                required_skills: BTreeSet::new(),
                experience_keywords: ["ops".to_string()].into_iter().collect(),
                description: "broken role".to_string(),
            },
        );
        let catalog = RoleCatalog { roles };
        assert!(matches!(
            catalog.validate(),
            Err(AppError::Configuration(_))
        ));
    }
}
