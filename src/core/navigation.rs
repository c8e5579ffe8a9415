use crate::domain::model::{CarouselItem, Owner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    PageDetail(String),
    UserProfile(String),
    None,
}

impl NavigationTarget {
    pub fn route(&self) -> Option<String> {
        match self {
            NavigationTarget::PageDetail(id) => Some(format!("/pages/{}", id)),
            NavigationTarget::UserProfile(id) => Some(format!("/profile/{}", id)),
            NavigationTarget::None => None,
        }
    }

    pub fn is_navigable(&self) -> bool {
        !matches!(self, NavigationTarget::None)
    }
}

pub fn resolve_navigation(item: &CarouselItem) -> NavigationTarget {
    match &item.owner {
        Some(Owner::Page(id)) => NavigationTarget::PageDetail(id.clone()),
        Some(Owner::User(id)) => NavigationTarget::UserProfile(id.clone()),
        None => NavigationTarget::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::fallback_items;

    #[test]
    fn test_navigation_targets() {
        let mut item = fallback_items().remove(0);
        assert_eq!(resolve_navigation(&item), NavigationTarget::None);
        assert_eq!(resolve_navigation(&item).route(), None);

        item.owner = Some(Owner::User("u-7".to_string()));
        let target = resolve_navigation(&item);
        assert_eq!(target, NavigationTarget::UserProfile("u-7".to_string()));
        assert_eq!(target.route().as_deref(), Some("/profile/u-7"));

        item.owner = Some(Owner::Page("p-3".to_string()));
        let target = resolve_navigation(&item);
        assert!(target.is_navigable());
        assert_eq!(target.route().as_deref(), Some("/pages/p-3"));
    }
}
