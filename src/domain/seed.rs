//! The static starter menu loaded when the storefront boots.

use super::{MenuItemCreate, ReviewDraft};

/// Pseudo category meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Burgers",
    "Noodles",
    "Tacos",
    "Dumplings",
    "Wraps",
    "Sides",
];

/// A starter item with the reviews it ships with, oldest first.
#[derive(Debug, Clone)]
pub struct SeedItem {
    pub item: MenuItemCreate,
    pub reviews: Vec<ReviewDraft>,
}

fn create(
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image_seed: &str,
    is_spicy: bool,
    is_veg: bool,
) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: format!("https://picsum.photos/seed/{image_seed}/400/300"),
        is_spicy,
        is_veg,
    }
}

fn review(user_id: &str, user_name: &str, rating: u8, comment: &str) -> ReviewDraft {
    ReviewDraft {
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
    }
}

pub fn starter_menu() -> Vec<SeedItem> {
    vec![
        SeedItem {
            item: create(
                "Spicy Szechuan Noodles",
                "Hand-pulled noodles tossed in fiery chili oil, peanuts, and scallions.",
                8.50,
                "Noodles",
                "noodles1",
                true,
                true,
            ),
            reviews: vec![
                review("u3", "Mike T.", 4, "Very spicy but delicious."),
                review("u2", "Sarah L.", 5, "Absolutely fire! 🔥 Best noodles in town."),
            ],
        },
        SeedItem {
            item: create(
                "Classic Beef Smashburger",
                "Double patty, melted cheddar, caramelized onions, and secret sauce on a brioche bun.",
                12.00,
                "Burgers",
                "burger1",
                false,
                false,
            ),
            reviews: vec![review("u4", "Jon D.", 5, "Perfection on a bun.")],
        },
        SeedItem {
            item: create(
                "Crispy Fish Tacos",
                "Battered cod, slaw, lime crema, and pico de gallo on soft corn tortillas.",
                9.50,
                "Tacos",
                "tacos1",
                false,
                false,
            ),
            reviews: vec![review("u5", "Emily R.", 4, "Fresh and crispy.")],
        },
        SeedItem {
            item: create(
                "Loaded Kimchi Fries",
                "Crispy fries topped with kimchi, spicy mayo, cheese curds, and sesame seeds.",
                7.00,
                "Sides",
                "fries1",
                true,
                true,
            ),
            reviews: Vec::new(),
        },
        SeedItem {
            item: create(
                "Chicken Momos",
                "Steamed dumplings filled with spiced chicken, served with tomato chutney.",
                8.00,
                "Dumplings",
                "momo1",
                false,
                false,
            ),
            reviews: Vec::new(),
        },
        SeedItem {
            item: create(
                "Falafel Wrap",
                "Crunchy falafel, hummus, tahini, pickles, and fresh greens in a pita.",
                9.00,
                "Wraps",
                "falafel1",
                false,
                true,
            ),
            reviews: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_menu_keeps_catalog_text() {
        let menu = starter_menu();
        assert_eq!(menu.len(), 6);

        let noodles = &menu[0];
        assert_eq!(noodles.item.name, "Spicy Szechuan Noodles");
        let comments: Vec<&str> = noodles.reviews.iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(
            comments,
            vec!["Very spicy but delicious.", "Absolutely fire! 🔥 Best noodles in town."]
        );
        assert!(menu.iter().all(|seed| seed.item.image.starts_with("https://picsum.photos/seed/")));
    }
}
