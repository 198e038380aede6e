use serde::{Deserialize, Serialize};

use crate::models::NewCharacterRow;

const LIST_SEPARATOR: &str = ",";

// Joins list values for storage. Items containing the separator can't be
// told apart once stored, which is why responses are built from the lists.
pub fn flatten(items: &[String]) -> String{
    items.join(LIST_SEPARATOR)
}

// Character attributes as scraped or submitted, before storage
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CharacterFields{
    pub name: String,
    pub description: String,
    pub appearances: Vec<String>,
    pub affiliations: Vec<String>,
    pub locations: Vec<String>,
    pub dimensions: Vec<String>,
    pub weapons: Vec<String>,
    pub vehicles: Vec<String>,
    pub tools: Vec<String>
}

impl CharacterFields {
    pub fn flatten(&self) -> NewCharacterRow{
        NewCharacterRow{
            name: self.name.clone(),
            description: self.description.clone(),
            appearances: flatten(&self.appearances),
            affiliations: flatten(&self.affiliations),
            locations: flatten(&self.locations),
            dimensions: flatten(&self.dimensions),
            weapons: flatten(&self.weapons),
            vehicles: flatten(&self.vehicles),
            tools: flatten(&self.tools)
        }
    }

    pub fn into_character(self, id: i32) -> Character{
        Character{
            id,
            name: self.name,
            description: self.description,
            species: None,
            homeworld: None,
            appearances: self.appearances,
            affiliations: self.affiliations,
            locations: self.locations,
            dimensions: self.dimensions,
            weapons: self.weapons,
            vehicles: self.vehicles,
            tools: self.tools
        }
    }
}

// Response shape of both character endpoints
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Character{
    pub id: i32,
    pub name: String,
    pub description: String,
    pub species: Option<String>,
    pub homeworld: Option<String>,
    pub appearances: Vec<String>,
    pub affiliations: Vec<String>,
    pub locations: Vec<String>,
    pub dimensions: Vec<String>,
    pub weapons: Vec<String>,
    pub vehicles: Vec<String>,
    pub tools: Vec<String>
}
