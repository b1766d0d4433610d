use super::{Notification, Watched};

/// Builds the announcement sent after `entity` was created.
///
/// Subject is `"<Model> Created"`, body is `"Dear user, <label> was created."`.
pub fn creation_notice<W: Watched>(entity: &W, from: &str, recipients: Vec<String>) -> Notification {
    let label = entity.label();
    Notification {
        subject: format!("{} Created", W::MODEL),
        body: format!("Dear user, {} was created.", label.value().unwrap_or_default()),
        from: from.to_string(),
        recipients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use chrono::Utc;

    fn category(id: i64, title: &str) -> Category {
        let now = Utc::now();
        Category {
            id,
            title: title.to_string(),
            slug: title.to_lowercase(),
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn creation_notice_for_category() {
        let notice = creation_notice(
            &category(1, "Laptops"),
            "noreply@texnomart.uz",
            vec!["ali@example.uz".to_string()],
        );

        assert_eq!(notice.subject, "Category Created");
        assert_eq!(notice.body, "Dear user, Laptops was created.");
        assert_eq!(notice.from, "noreply@texnomart.uz");
        assert_eq!(notice.recipients, vec!["ali@example.uz".to_string()]);
    }

    #[test]
    fn distinct_titles_give_distinct_bodies() {
        let a = creation_notice(&category(1, "Laptops"), "noreply@texnomart.uz", vec![]);
        let b = creation_notice(&category(2, "Tablets"), "noreply@texnomart.uz", vec![]);
        assert_ne!(a.body, b.body);
        assert!(b.body.contains("Tablets"));
    }
}
