use diesel::prelude::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::{characters, data_warehouse, inventory, products, sales, users};

// Password holds the argon2 PHC string, never the plaintext
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User{
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser{
    pub name: String,
    pub email: String,
    pub password: String
}

// What the api exposes for a user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile{
    pub id: i32,
    pub name: String,
    pub email: String
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile{
            id: user.id,
            name: user.name,
            email: user.email
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product{
    pub id: i32,
    pub name: String,
    pub description: String,
    pub quantity: i32
}

#[derive(Insertable, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct{
    pub name: String,
    pub description: String,
    pub quantity: i32
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = inventory)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InventoryItem{
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub warehouse: i32
}

#[derive(Insertable, Debug)]
#[diesel(table_name = inventory)]
pub struct NewInventoryItem{
    pub product_name: String,
    pub quantity: i32,
    pub warehouse: i32
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Sale{
    pub id: i32,
    pub total: i32,
    pub quantity: i32,
    pub product: String
}

#[derive(Insertable, Debug)]
#[diesel(table_name = sales)]
pub struct NewSale{
    pub total: i32,
    pub quantity: i32,
    pub product: String
}

// `data` is the serialized json document
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = data_warehouse)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DataWarehouseRow{
    pub id: i32,
    pub data: String
}

#[derive(Insertable)]
#[diesel(table_name = data_warehouse)]
pub struct NewDataWarehouseRow{
    pub data: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataWarehouseRecord{
    pub id: i32,
    pub data: serde_json::Value
}

impl TryFrom<DataWarehouseRow> for DataWarehouseRecord {
    type Error = serde_json::Error;

    fn try_from(row: DataWarehouseRow) -> Result<Self, Self::Error> {
        Ok(DataWarehouseRecord{
            id: row.id,
            data: serde_json::from_str(&row.data)?
        })
    }
}

// List valued character fields are stored comma joined. Neither endpoint
// knows `species` or `homeworld`, they stay NULL
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = characters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CharacterRow{
    pub id: i32,
    pub name: String,
    pub description: String,
    pub species: Option<String>,
    pub homeworld: Option<String>,
    pub appearances: String,
    pub affiliations: String,
    pub locations: String,
    pub dimensions: String,
    pub weapons: String,
    pub vehicles: String,
    pub tools: String
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = characters)]
pub struct NewCharacterRow{
    pub name: String,
    pub description: String,
    pub appearances: String,
    pub affiliations: String,
    pub locations: String,
    pub dimensions: String,
    pub weapons: String,
    pub vehicles: String,
    pub tools: String
}
