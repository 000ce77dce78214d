use crate::catalog::Dataset;
use crate::domain::{Category, CategoryId, Product, ProductId, Sex, User, UserId};

/// Built-in records used when no dataset file is configured.
const DEMO_USERS: &[(u32, &str, Sex)] = &[
    (1, "Roma", Sex::Male),
    (2, "Anna", Sex::Female),
    (3, "Max", Sex::Male),
    (4, "John", Sex::Male),
];

const DEMO_CATEGORIES: &[(u32, &str, &str, u32)] = &[
    (1, "Grocery", "🍞", 2),
    (2, "Drinks", "🍺", 3),
    (3, "Fruits", "🍏", 2),
    (4, "Electronics", "💻", 1),
    (5, "Clothes", "👚", 3),
];

const DEMO_PRODUCTS: &[(u32, &str, u32)] = &[
    (1, "Milk", 2),
    (2, "Bread", 1),
    (3, "iPhone", 4),
    (4, "Eggs", 1),
    (5, "Jacket", 5),
    (6, "Sugar", 1),
    (7, "Banana", 3),
    (8, "Apple", 3),
];

pub fn demo_dataset() -> Dataset {
    Dataset {
        users: DEMO_USERS
            .iter()
            .map(|(id, name, sex)| User { id: UserId(*id), name: (*name).to_string(), sex: *sex })
            .collect(),
        categories: DEMO_CATEGORIES
            .iter()
            .map(|(id, title, icon, owner)| Category {
                id: CategoryId(*id),
                title: (*title).to_string(),
                icon: (*icon).to_string(),
                owner_id: UserId(*owner),
            })
            .collect(),
        products: DEMO_PRODUCTS
            .iter()
            .map(|(id, name, category)| Product {
                id: ProductId(*id),
                name: (*name).to_string(),
                category_id: CategoryId(*category),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::demo_dataset;
    use crate::catalog::Catalog;
    use crate::domain::UserId;

    #[test]
    fn demo_dataset_joins_cleanly() {
        let catalog = Catalog::join(demo_dataset()).expect("demo dataset is consistent");

        assert_eq!(catalog.products().len(), 8);
        let owners: Vec<(&str, &str)> = catalog
            .products()
            .iter()
            .take(3)
            .map(|product| (product.name.as_str(), product.user.name.as_str()))
            .collect();
        assert_eq!(owners, vec![("Milk", "Max"), ("Bread", "Anna"), ("iPhone", "Roma")]);
    }

    #[test]
    fn demo_dataset_has_a_user_without_categories() {
        let catalog = Catalog::join(demo_dataset()).expect("demo dataset is consistent");

        assert!(catalog.user(UserId(4)).is_some());
        assert!(catalog.categories().iter().all(|category| category.owner_id != UserId(4)));
    }
}
