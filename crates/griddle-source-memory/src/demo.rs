use griddle_grid::Record;
use serde_json::json;

/// Deterministic demo dataset for standalone servers and examples.
pub fn demo_records(count: usize) -> Vec<Record> {
    (0..count).map(demo_record).collect()
}

fn demo_record(i: usize) -> Record {
    let first_names = [
        "Alice", "Bob", "Carol", "David", "Eve", "Frank", "Grace", "Hank", "Iris", "Jack",
    ];
    let last_names = [
        "Johnson", "Smith", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Clark",
        "Young",
    ];
    let statuses = ["active", "inactive", "pending", "suspended"];

    let first = first_names[i % first_names.len()];
    let last = last_names[i % last_names.len()];
    let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
    let value = ((i as f64 + 1.0) * 1234.56).round();

    let record = json!({
        "id": format!("user-{i:03}"),
        "first_name": first,
        "last_name": last,
        "email": email,
        "status": statuses[i % statuses.len()],
        "value": value,
    });

    match record {
        serde_json::Value::Object(record) => record,
        _ => unreachable!("demo record is an object literal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count() {
        assert_eq!(demo_records(100).len(), 100);
    }

    #[test]
    fn records_are_deterministic() {
        let record = demo_record(0);
        assert_eq!(record["id"], "user-000");
        assert_eq!(record["first_name"], "Alice");
        assert_eq!(record["last_name"], "Johnson");
        assert_eq!(record["email"], "alice.johnson@example.com");
        assert_eq!(record["status"], "active");
        assert_eq!(record["value"], 1235.0);
    }

    #[test]
    fn names_cycle_through_the_pools() {
        let record = demo_record(11);
        assert_eq!(record["first_name"], "Bob");
        assert_eq!(record["last_name"], "Smith");
    }
}
