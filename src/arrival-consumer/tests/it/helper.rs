use arrival_consumer::{
    consumer::{Consumer, ConsumerStats},
    models::ArrivalVerdict,
};
use vessel_core::{ArrivalClassifier, VesselSnapshot};

pub static TEST_MAX_LINE_LENGTH: usize = 4096;

pub struct TestHelper {
    consumer: Consumer,
    input: Vec<Vec<u8>>,
}

impl Default for TestHelper {
    fn default() -> Self {
        Self {
            consumer: Consumer::new(ArrivalClassifier::default(), TEST_MAX_LINE_LENGTH),
            input: Vec::new(),
        }
    }
}

impl TestHelper {
    pub fn send_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.send_bytes(line.into().into_bytes())
    }

    pub fn send_bytes(&mut self, line: impl Into<Vec<u8>>) -> &mut Self {
        self.input.push(line.into());
        self
    }

    pub fn send_json(&mut self, value: serde_json::Value) -> &mut Self {
        self.send_line(value.to_string())
    }

    pub fn send_snapshot(&mut self, snapshot: &VesselSnapshot) -> &mut Self {
        self.send_json(serde_json::to_value(snapshot).unwrap())
    }

    pub async fn run(&self) -> (ConsumerStats, Vec<ArrivalVerdict>) {
        let mut input = self.input.join(&b'\n');
        input.push(b'\n');

        let mut output = Vec::new();
        let stats = self
            .consumer
            .run(input.as_slice(), &mut output)
            .await
            .unwrap();

        let verdicts = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        (stats, verdicts)
    }
}
