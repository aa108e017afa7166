use kernel::model::spot::Spot;

#[derive(sqlx::FromRow)]
pub struct SpotRow {
    pub number: i32,
    pub occupied: bool,
}

impl From<SpotRow> for Spot {
    fn from(value: SpotRow) -> Self {
        let SpotRow { number, occupied } = value;
        Spot { number, occupied }
    }
}
