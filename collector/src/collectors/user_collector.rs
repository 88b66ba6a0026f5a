use crate::{
    collectors::Collector,
    metrics::*,
    plexpy::Command,
    CollectError,
};
use serde_json::Value;

/// Total and home user counts from `get_users`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserCollector;

impl Collector for UserCollector {
    fn command(&self) -> Command {
        Command::GetUsers
    }

    fn transform(&self, payload: Value) -> Result<FieldMap, CollectError> {
        let users = serde_json::from_value::<Envelope<Vec<User>>>(payload)?.into_data();
        Ok(UserSnapshot::from_users(&users).fields())
    }

    fn name(&self) -> &'static str {
        "UserCollector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn counts_home_users() {
        let payload = json!({
            "response": {
                "data": [
                    { "username": "alice", "is_home_user": "1" },
                    { "username": "bob", "is_home_user": "0" },
                    { "username": "carol", "is_home_user": "1" }
                ]
            }
        });

        let fields = UserCollector.transform(payload).unwrap();

        assert_eq!(
            fields,
            FieldMap::from([("total_users".to_string(), 3), ("home_users".to_string(), 2)])
        );
        assert_eq!(UserCollector.measurement(), "get_users");
    }

    #[test]
    fn only_exact_flag_counts() {
        let payload = json!({
            "response": { "data": [ { "is_home_user": "true" }, { "is_home_user": " 1" }, {} ] }
        });

        let fields = UserCollector.transform(payload).unwrap();

        assert_eq!(fields.get("total_users"), Some(&3));
        assert_eq!(fields.get("home_users"), Some(&0));
    }
}
