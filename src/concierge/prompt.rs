use crate::domain::MenuItem;

use super::Language;

/// One line per item, as the model sees the menu.
pub fn menu_context(menu: &[MenuItem]) -> String {
    menu.iter()
        .map(MenuItem::prompt_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed persona and house rules, with the live menu embedded.
pub fn system_instruction(menu: &[MenuItem], language: Language) -> String {
    let setting = match language {
        Language::English => "English",
        Language::Filipino => "Filipino/Taglish",
    };

    format!(
        r#"You are "StreetBot", the AI food concierge for "PinoyBites", a street food app.
Your goal is to help customers choose delicious street food, suggest pairings, and answer questions about ingredients.

Here is our current Menu:
{menu}

Context:
- Current Language Setting: {setting}

Rules:
1. If the language setting is 'Filipino', use enthusiastic "Taglish" (English mixed with Tagalog slang like "Solid to!", "Masarap!", "Tara kain!").
2. If the language setting is 'English', use friendly, standard English, but you can keep the food names in Filipino.
3. If a user asks for spicy food, recommend items flagged Spicy.
4. If a user is vegetarian, only recommend items flagged Veg.
5. Suggest combos from the menu.
6. Keep responses under 50 words unless asked for a story.
7. Do not mention items not on the menu."#,
        menu = menu_context(menu),
        setting = setting,
    )
}

/// Image prompt for the admin "generate photo" button.
pub fn image_prompt(name: &str, description: &str) -> String {
    format!(
        "Appetizing street food photography of {name}: {description}. Close-up, natural light, served on a simple plate."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::starter_menu;
    use crate::domain::MenuItem;

    fn menu() -> Vec<MenuItem> {
        starter_menu()
            .into_iter()
            .enumerate()
            .map(|(i, seed)| MenuItem {
                id: format!("item_{}", i + 1),
                name: seed.item.name,
                description: seed.item.description,
                price: seed.item.price,
                category: seed.item.category,
                image: seed.item.image,
                rating: 0.0,
                reviews: Vec::new(),
                is_spicy: seed.item.is_spicy,
                is_veg: seed.item.is_veg,
            })
            .collect()
    }

    #[test]
    fn system_instruction_embeds_every_item_and_language() {
        let menu = menu();
        let prompt = system_instruction(&menu, Language::Filipino);
        for item in &menu {
            assert!(prompt.contains(&item.prompt_line()));
        }
        assert!(prompt.contains("Current Language Setting: Filipino/Taglish"));
        assert_eq!(menu_context(&menu).lines().count(), menu.len());
    }
}
