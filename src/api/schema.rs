//! Wire schemas for the four upstream endpoints.
//!
//! Each response shape is declared explicitly so that a body which does not
//! match fails at the boundary with a decode error instead of leaking absent
//! fields into the controller. Required fields are plain; nullable or
//! sometimes-missing fields are `Option` with `#[serde(default)]`.
//!
//! Conversions into [`crate::domain`] types happen here, keeping the rest of
//! the crate independent of the API's naming.

use crate::domain::{Category, CategorySlot, Item, ListReference, Sprites, Stat};
use serde::Deserialize;

/// `{name, url}` pair used by every listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl From<NamedResource> for ListReference {
    fn from(resource: NamedResource) -> Self {
        Self {
            name: resource.name,
            url: resource.url,
        }
    }
}

/// `GET /pokemon?limit&offset`
#[derive(Debug, Clone, Deserialize)]
pub struct ListPageResponse {
    pub count: u64,
    pub results: Vec<NamedResource>,
}

/// `GET /type`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryListResponse {
    pub results: Vec<NamedResource>,
}

impl CategoryListResponse {
    pub fn into_categories(self) -> Vec<Category> {
        self.results
            .into_iter()
            .map(|r| Category::new(r.name))
            .collect()
    }
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMembersResponse {
    pub pokemon: Vec<CategoryMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    pub pokemon: NamedResource,
    pub slot: u8,
}

impl CategoryMembersResponse {
    pub fn into_references(self) -> Vec<ListReference> {
        self.pokemon
            .into_iter()
            .map(|member| member.pokemon.into())
            .collect()
    }
}

/// `GET {detail url}`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub types: Vec<TypeSlotResponse>,
    pub sprites: SpritesResponse,
    pub stats: Vec<StatResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlotResponse {
    pub slot: u8,
    #[serde(rename = "type")]
    pub category: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpritesResponse {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSpritesResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSpritesResponse {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<FrontDefault>,
    #[serde(default)]
    pub dream_world: Option<FrontDefault>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontDefault {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatResponse {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

impl From<ItemResponse> for Item {
    fn from(response: ItemResponse) -> Self {
        let other = response.sprites.other.unwrap_or_default();

        let mut categories: Vec<CategorySlot> = response
            .types
            .into_iter()
            .map(|t| CategorySlot {
                slot: t.slot,
                name: t.category.name,
            })
            .collect();
        categories.sort_by_key(|c| c.slot);

        Self {
            id: response.id,
            name: response.name,
            categories,
            sprites: Sprites {
                front_default: response.sprites.front_default,
                front_shiny: response.sprites.front_shiny,
                back_default: response.sprites.back_default,
                back_shiny: response.sprites.back_shiny,
                official_artwork: other.official_artwork.and_then(|a| a.front_default),
                dream_world: other.dream_world.and_then(|d| d.front_default),
            },
            stats: response
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base: s.base_stat,
                    effort: s.effort,
                })
                .collect(),
            height: response.height,
            weight: response.weight,
            base_experience: response.base_experience,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "base_experience": null,
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
        ],
        "sprites": {
            "front_default": null,
            "front_shiny": "https://img/shiny/25.png",
            "back_default": null,
            "back_shiny": null,
            "other": {
                "official-artwork": {"front_default": "https://img/art/25.png"},
                "dream_world": {"front_default": null},
                "home": {"front_default": "ignored"}
            }
        },
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
        ],
        "abilities": []
    }"#;

    #[test]
    fn detail_converts_to_item() {
        let response: ItemResponse = serde_json::from_str(DETAIL).unwrap();
        let item = Item::from(response);

        assert_eq!(item.id, 25);
        assert_eq!(item.base_experience, None);
        assert_eq!(item.category_names().next(), Some("electric"));
        assert_eq!(item.display_image(), "https://img/art/25.png");
        assert_eq!(item.stats[1], Stat { name: "speed".to_string(), base: 90, effort: 2 });
    }

    #[test]
    fn detail_missing_required_field_is_rejected() {
        let body = r#"{"id": 1, "name": "bulbasaur", "types": [], "sprites": {}, "stats": []}"#;
        assert!(serde_json::from_str::<ItemResponse>(body).is_err());
    }

    #[test]
    fn detail_without_other_sprites_is_accepted() {
        let body = r#"{"id": 1, "name": "bulbasaur", "height": 7, "weight": 69,
            "types": [], "sprites": {"front_default": "f"}, "stats": []}"#;
        let item = Item::from(serde_json::from_str::<ItemResponse>(body).unwrap());
        assert_eq!(item.display_image(), "f");
        assert!(item.categories.is_empty());
    }

    #[test]
    fn category_members_flatten_to_references() {
        let body = r#"{"id": 10, "name": "fire", "pokemon": [
            {"pokemon": {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}, "slot": 1},
            {"pokemon": {"name": "charizard", "url": "https://pokeapi.co/api/v2/pokemon/6/"}, "slot": 1}
        ]}"#;
        let refs = serde_json::from_str::<CategoryMembersResponse>(body)
            .unwrap()
            .into_references();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].name, "charizard");
    }

    #[test]
    fn list_page_requires_count() {
        let body = r#"{"results": []}"#;
        assert!(serde_json::from_str::<ListPageResponse>(body).is_err());
    }
}
