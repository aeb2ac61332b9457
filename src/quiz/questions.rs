use crate::quiz::Question;

// (prompt, answers, index of the correct answer)
const DETECTIVE_QUESTIONS: [(&str, [&str; 2], usize); 10] = [
    (
        "Is it a rainy night or a rainy day?",
        ["Rainy night", "Rainy day"],
        0,
    ),
    (
        "Does the house have two windows on the side with the left window broken, or is the right window broken?",
        ["Left window", "Right window"],
        0,
    ),
    (
        "Is there a dark blue piece of cloth stuck to one of the points of the broken glass, or is it a dark red piece of cloth?",
        ["Blue cloth", "Red cloth"],
        0,
    ),
    (
        "Are there footprints on the kitchen floor, or are there bloodstains on the kitchen floor?",
        ["Footprints", "Bloodstains"],
        0,
    ),
    (
        "Is the murdered woman lying in her bed, or is she lying next to her bed?",
        ["In her bed", "Next to her bed"],
        1,
    ),
    (
        "Are the bed and the ground free of blood, or are the bed and the ground covered in blood?",
        ["Free of blood", "Covered in blood"],
        1,
    ),
    (
        "Was the note with 'Remember Me ;)' in her hand or on the nightstand?",
        ["In hand", "Nightstand"],
        0,
    ),
    (
        "Was the murder weapon a kitchen knife or a pocket knife?",
        ["Kitchen Knife", "Pocket Knife"],
        1,
    ),
    ("Is the murder weapon cleaned?", ["Yes", "No"], 0),
    (
        "Did he leave through the door or the broken window?",
        ["Door", "Window"],
        0,
    ),
];

/// The crime scene questions every investigation is played with, in order.
pub fn detective_questions() -> Vec<Question> {
    DETECTIVE_QUESTIONS
        .iter()
        .map(|(text, answers, correct_index)| Question::new(text, answers, *correct_index))
        .collect()
}
